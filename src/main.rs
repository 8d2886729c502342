/// Command line entry point for native builds
#[cfg(not(target_arch = "wasm32"))]
mod cli;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::main()
}

// WASM doesn't use main(), the browser drives the canvas through wasm_bindgen
#[cfg(target_arch = "wasm32")]
fn main() {}
