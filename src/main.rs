//! # Voxel World Entry Point
//!
//! Native entry point for the headless world driver. It simply calls into the library's
//! `run()` function, which sets up logging, reads `options.json` and streams the world
//! around a moving viewpoint.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    voxel_world::run();
}
