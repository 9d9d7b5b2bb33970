use std::env;
use std::io;

fn main() {
    let args: Vec<String> = env::args().collect();
    let code = chiptally_cli::run(args, &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
