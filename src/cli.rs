use crate::demosaic::Rounding;
use crate::image::writer::ppm::PixelEncoding;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, error::ErrorKind,
    value_parser, Arg, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, process, thread};

const INVALID_ARGUMENTS_EXIT_CODE: i32 = 1;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| Self::exit_on_error(e));
        Self::extract_arguments(&matches)
    }

    /// Help and version requests exit successfully, every other argument
    /// problem exits with code 1.
    fn exit_on_error(error: clap::Error) -> ! {
        match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
            _ => {
                let _ = error.print();
                process::exit(INVALID_ARGUMENTS_EXIT_CODE)
            }
        }
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_threads_argument(command);
        let command = Self::register_rounding_argument(command);
        Self::register_pixel_encoding_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn register_rounding_argument(command: Command) -> Command {
        command.arg(Self::create_rounding_argument())
    }

    fn register_pixel_encoding_argument(command: Command) -> Command {
        command.arg(Self::create_pixel_encoding_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to PGM mosaic input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to PPM output file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_rounding_argument() -> Arg {
        arg!(rounding: -r --rounding <ROUNDING> "Tie-break rule for averaged values")
            .default_value("HalfToEven")
            .value_parser(value_parser!(Rounding))
    }

    fn create_pixel_encoding_argument() -> Arg {
        arg!(pixel_encoding: -e --encoding <ENCODING> "Raster encoding of the PPM output")
            .default_value("Binary")
            .value_parser(value_parser!(PixelEncoding))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
            rounding: Self::extract_rounding_argument(matches),
            pixel_encoding: Self::extract_pixel_encoding_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Required argument output_file not provided")
            .clone()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }

    fn extract_rounding_argument(matches: &ArgMatches) -> Rounding {
        matches
            .get_one::<Rounding>("rounding")
            .expect("Rounding must be provided, but was unset.")
            .to_owned()
    }

    fn extract_pixel_encoding_argument(matches: &ArgMatches) -> PixelEncoding {
        matches
            .get_one::<PixelEncoding>("pixel_encoding")
            .expect("Pixel encoding must be provided, but was unset.")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
