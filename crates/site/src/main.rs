//! Binary entrypoint for the browser-hosted IDE front-end.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    site::mount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!(
        "This binary is intended for the browser/WASM workflow. Build `site_app` for wasm32 with the `csr` feature and point it at the backend with `IDE_BACKEND_URL` or `?backend=`."
    );
}
