fn main() {
    if let Err(err) = sheet_scrub::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
