fn main() {
    let cli = pcbcoil::args::parse_cli_args();

    if let Err(err) = pcbcoil::init_logging(cli.json_logs) {
        eprintln!("{}", err);
    }

    if let Err(err) = pcbcoil::run(cli) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
