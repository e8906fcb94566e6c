extern crate pocketcal as lib;

use flexi_logger::{FileSpec, Logger};
use lib::config::Config;
use lib::events::{Dispatcher, Event};
use lib::term::TerminalHost;
use lib::ui::{render, App, Flow};
use lib::host::{Clock, LocalClock};
use nix::sys::termios;
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use termion::cursor;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "pcal",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "pocketcal - A handheld style month calendar."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only show the month non-interactively"
    )]
    pub show: bool,

    #[structopt(short = "y", long = "year", help = "year to start with")]
    pub year: Option<i32>,

    #[structopt(short = "m", long = "month", help = "month to start with (1-12)")]
    pub month: Option<u32>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn run<W: Write>(
    app: &mut App,
    host: &mut TerminalHost<'_, W>,
    dispatcher: &Dispatcher,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match dispatcher.next()? {
            Event::Update => {
                if app.update(host) == Flow::Reset {
                    log::info!("Calendar was reset");
                }
                host.present()?;
            }
            Event::Input(key) => {
                if !host.handle_key(key, config) {
                    return Ok(());
                }
            }
            Event::InputClosed => {
                log::info!("Input closed, exiting");
                return Ok(());
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    // Anything but errors on stderr would tear up the screen
    let mut logger = Logger::try_with_env_or_str(if args.log_file.is_some() {
        DEFAULT_LOG_LEVEL
    } else {
        "error"
    })?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let (year, month) = config.start(args.year, args.month, &LocalClock)?;
    let mut app = App::new(year, month)?;

    if args.show {
        let dispatcher = Dispatcher::new();
        let mut host = TerminalHost::new(io::sink(), &dispatcher);
        render(&mut host, year, month, LocalClock.today());
        println!("{}", host.snapshot());
        return Ok(());
    }

    const STDIN: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDIN)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDIN, termios::SetArg::TCSANOW, &attr);
        }

        println!("pocketcal ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let dispatcher = Dispatcher::from_config(&config);

    let mut screen = AlternateScreen::from(stdout().into_raw_mode()?);
    write!(screen, "{}", cursor::Hide)?;

    let mut host = TerminalHost::new(screen, &dispatcher);
    log::info!("Starting at {} {}", month.name(), year);
    let result = run(&mut app, &mut host, &dispatcher, &config);

    let mut screen = host.into_inner();
    write!(screen, "{}", cursor::Show)?;
    screen.flush()?;

    result
}
