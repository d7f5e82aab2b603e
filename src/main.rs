fn main() {
    if let Err(err) = bridge_diagram_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
