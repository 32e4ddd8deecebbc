mod cli;

use tracing::Level;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    init_tracing(command_line_interface.verbose);
    let code = command_line_interface.run();
    std::process::exit(code);
}
