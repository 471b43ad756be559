fn main() {
    env_logger::init();
    if let Err(err) = sticky_notes::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
