//! Generates `movie_ffi.h` from the `extern "C"` surface into `OUT_DIR`.
//! Set `MOVIE_FFI_HEADER_DIR` to also copy it where the host build expects it.

use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=MOVIE_FFI_HEADER_DIR");

    let (Ok(crate_dir), Ok(out_dir)) = (
        std::env::var("CARGO_MANIFEST_DIR"),
        std::env::var("OUT_DIR"),
    ) else {
        return;
    };
    let header = PathBuf::from(out_dir).join("movie_ffi.h");

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("MOVIE_FFI_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(&header);
        }
        Err(e) => {
            println!("cargo:warning=header not generated: {e}");
            return;
        }
    }

    let Ok(dest) = std::env::var("MOVIE_FFI_HEADER_DIR") else {
        return;
    };
    let dest = PathBuf::from(dest);
    let copied = std::fs::create_dir_all(&dest)
        .and_then(|()| std::fs::copy(&header, dest.join("movie_ffi.h")).map(|_| ()));
    if let Err(e) = copied {
        println!("cargo:warning=cannot copy header to {}: {e}", dest.display());
    }
}
