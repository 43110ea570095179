fn main() -> anyhow::Result<()> {
    wizard_installer::run()
}
