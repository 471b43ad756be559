//! Alternate binary name (`sn`) that forwards to the `sticky_notes` library.
//! Keeping the alias as a real binary avoids shell alias requirements.

fn main() {
    env_logger::init();
    if let Err(err) = sticky_notes::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
