fn main() {
    #[cfg(feature = "cli")]
    lzss::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("lzss: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
