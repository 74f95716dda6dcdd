fn main() {
    if let Err(e) = lib_emitter_demo::init() {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
