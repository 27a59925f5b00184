fn main() -> Result<(), Box<dyn std::error::Error>> {
    allegro::runtime::run()
}
