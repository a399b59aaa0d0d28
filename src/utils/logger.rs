use env_logger::Env;

/// Installs `env_logger` as the `log` backend.
///
/// Defaults to the `info` level; `RUST_LOG` overrides it. Calling this more than once is harmless,
/// later calls are ignored.
///
/// # Examples
///
/// ```
/// rs_barnes_hut::utils::init_logger();
/// rs_barnes_hut::utils::init_logger();
/// log::info!("logger ready");
/// ```
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
