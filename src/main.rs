fn main() {
    if let Err(err) = stockping::run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
