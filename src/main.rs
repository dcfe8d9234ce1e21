fn main() -> anyhow::Result<()> {
    fleet_roster::run()
}
