//! # Voxel Stream Entry Point
//!
//! Runs the headless streaming demo from the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- [config.json]
//! ```

fn main() {
    if let Err(err) = voxel_stream::run() {
        log::error!("{err}");
        eprintln!("voxel-stream: {err}");
        std::process::exit(1);
    }
}
