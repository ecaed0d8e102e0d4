use crate::mosaic::OutputMode;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

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
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_argument(command);
        let command = Self::register_output_directory_argument(command);
        let command = Self::register_block_size_argument(command);
        let command = Self::register_extension_argument(command);
        let command = Self::register_mode_argument(command);
        let command = Self::register_name_argument(command);
        Self::register_threads_argument(command)
    }

    fn register_input_argument(command: Command) -> Command {
        command.arg(Self::create_input_argument())
    }

    fn register_output_directory_argument(command: Command) -> Command {
        command.arg(Self::create_output_directory_argument())
    }

    fn register_block_size_argument(command: Command) -> Command {
        command.arg(Self::create_block_size_argument())
    }

    fn register_extension_argument(command: Command) -> Command {
        command.arg(Self::create_extension_argument())
    }

    fn register_mode_argument(command: Command) -> Command {
        command.arg(Self::create_mode_argument())
    }

    fn register_name_argument(command: Command) -> Command {
        command.arg(Self::create_name_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_argument() -> Arg {
        Arg::new("input")
            .help("Image file, or directory of images, to sample")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_directory_argument() -> Arg {
        arg!(output_directory: -o --output_directory <DIR> "Directory for the JSON output")
            .default_value(".")
            .value_parser(value_parser!(PathBuf))
    }

    fn create_block_size_argument() -> Arg {
        arg!(block_size: -b --block_size <PIXELS> "Distance between sampled pixels")
            .default_value("10")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64))
    }

    fn create_extension_argument() -> Arg {
        arg!(extension: -e --extension <EXT> "Extension of the images read from an input directory")
            .default_value("png")
    }

    fn create_mode_argument() -> Arg {
        arg!(mode: -m --mode <MODE> "Write the whole grid or only its distinct colors")
            .default_value("Grid")
            .value_parser(value_parser!(OutputMode))
    }

    fn create_name_argument() -> Arg {
        arg!(name: -n --name <LABEL> "Name stored with a single sampled image")
            .required(false)
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input: Self::extract_input_argument(matches),
            output_directory: Self::extract_output_directory_argument(matches),
            block_size: Self::extract_block_size_argument(matches),
            extension: Self::extract_extension_argument(matches),
            mode: Self::extract_mode_argument(matches),
            label: Self::extract_name_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
        }
    }

    fn extract_input_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input")
            .expect("Required argument input not provided")
            .clone()
    }

    fn extract_output_directory_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_directory")
            .expect("Output directory must be provided, but was unset.")
            .clone()
    }

    fn extract_block_size_argument(matches: &ArgMatches) -> i64 {
        *matches
            .get_one::<i64>("block_size")
            .expect("Block size must be provided, but was unset.")
    }

    fn extract_extension_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("extension")
            .expect("Extension must be provided, but was unset.")
            .clone()
    }

    fn extract_mode_argument(matches: &ArgMatches) -> OutputMode {
        matches
            .get_one::<OutputMode>("mode")
            .expect("Output mode must be provided, but was unset.")
            .to_owned()
    }

    fn extract_name_argument(matches: &ArgMatches) -> Option<String> {
        matches.get_one::<String>("name").cloned()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
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
