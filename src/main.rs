fn main() -> Result<(), keyfetch::Error> {
    env_logger::init();

    keyfetch::run()
}
