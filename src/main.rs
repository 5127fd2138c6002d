//! Beta Dose Lab entry point
//!
//! Native: runs the lab headless for a few seconds and logs readings.
//! Web: the page drives `platform::web::WebLab` directly.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use beta_dose_lab::narrator::TemplateNarrator;
    use beta_dose_lab::platform::SETTINGS_FILE;
    use beta_dose_lab::{Lab, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Beta Dose Lab (native) starting...");

    let mut args = std::env::args().skip(1);
    let path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    let settings = if path.exists() {
        match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    } else {
        log::info!("No settings at {}, using defaults with the source open", path.display());
        Settings {
            source_open: true,
            ..Default::default()
        }
    };

    let mut lab = match Lab::new(&settings) {
        Ok(lab) => lab,
        Err(e) => {
            log::error!("Invalid settings: {e}");
            std::process::exit(1);
        }
    };
    lab.start();

    let frame_time = Duration::from_secs_f32(settings.frame_dt());
    let deadline = Instant::now() + Duration::from_secs(seconds);
    let mut last = Instant::now();
    let mut last_reading = lab.reading();

    while Instant::now() < deadline {
        std::thread::sleep(frame_time);
        let now = Instant::now();
        let report = lab.frame((now - last).as_secs_f32());
        last = now;

        if report.clock.dose_samples > 0 && lab.reading() != last_reading {
            last_reading = lab.reading();
            log::info!(
                "{} µSv/h | counts {} | particles {}",
                last_reading.display(),
                lab.counts(),
                lab.state().particles.len()
            );
        }
    }

    lab.stop();
    let frame = lab.render();
    log::info!(
        "Stopped after {} ticks, {} triangles in last frame",
        lab.state().time_ticks,
        frame.triangle_count()
    );
    log::info!("{}", lab.explain(&TemplateNarrator));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is the WebLab binding
}
