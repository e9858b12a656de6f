fn main() {
    nattd::app::cli::run();
}
