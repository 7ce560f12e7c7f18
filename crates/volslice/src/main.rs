use volslice::Options;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // run_app logs the failure and releases everything before returning.
    if volslice::run_app(Options::default()).is_err() {
        std::process::exit(-1);
    }
}
