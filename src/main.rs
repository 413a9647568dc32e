mod color;
mod context;
mod data;
mod error;
mod perf;
mod pipeline;
mod persist;
mod report;
mod showcase;
mod viz;

fn main() {
    env_logger::init();

    if let Err(err) = pipeline::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
