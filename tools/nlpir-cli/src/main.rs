use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;
use tracing_subscriber::EnvFilter;

use nlpir_rs::license::{self, LICENSE_URL};
use nlpir_rs::native::{EncodingErrors, EngineEncoding, NlpirLibrary, NlpirOptions, PosTagSet};
use nlpir_rs::{
    get_pos_name, Engine, FormatOptions, Granularity, JiebaEngine, KeywordAlgorithm, Nlpir,
    TagNames, ICTPOS,
};

const BLUE: &str = "\x1B[1;34m";
const RED: &str = "\x1B[1;31m";
const RESET: &str = "\x1B[0m";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let matches = Command::new("nlpir")
        .version(env!("CARGO_PKG_VERSION"))
        .about(format!(
            "{}nlpir: Chinese word segmentation and keyword extraction{}",
            BLUE, RESET
        ))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("segment")
                .about("Segment text into words, with part of speech tags")
                .args(io_args())
                .args(engine_args())
                .arg(
                    Arg::new("names")
                        .long("names")
                        .value_name("names")
                        .default_value("parent")
                        .help("Tag names: [parent|child|all|code]"),
                )
                .arg(
                    Arg::new("chinese")
                        .long("chinese")
                        .action(ArgAction::SetTrue)
                        .help("Use Chinese part of speech names"),
                )
                .arg(
                    Arg::new("no_pos")
                        .long("no-pos")
                        .action(ArgAction::SetTrue)
                        .help("Segment without part of speech tagging"),
                )
                .arg(
                    Arg::new("delimiter")
                        .long("delimiter")
                        .value_name("text")
                        .default_value(":")
                        .help("Joins full-path names when --names all"),
                ),
        )
        .subcommand(
            Command::new("keywords")
                .about("Extract key words")
                .args(io_args())
                .args(engine_args())
                .arg(
                    Arg::new("max_words")
                        .short('n')
                        .long("max-words")
                        .value_name("count")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("50")
                        .help("Maximum number of key words"),
                )
                .arg(
                    Arg::new("weighted")
                        .short('w')
                        .long("weighted")
                        .action(ArgAction::SetTrue)
                        .help("Include key word weights"),
                ),
        )
        .subcommand(
            Command::new("pos")
                .about("Look up a part of speech code")
                .arg(Arg::new("code").required(true).help("Part of speech code, e.g. nsf"))
                .arg(
                    Arg::new("names")
                        .long("names")
                        .value_name("names")
                        .default_value("all")
                        .help("Granularity: [parent|child|all]"),
                )
                .arg(
                    Arg::new("chinese")
                        .long("chinese")
                        .action(ArgAction::SetTrue)
                        .help("Use Chinese part of speech names"),
                ),
        )
        .subcommand(
            Command::new("update").about("Update NLPIR license").arg(
                Arg::new("data_dir")
                    .short('d')
                    .long("data-dir")
                    .value_name("dir")
                    .help("The NLPIR data directory to use [default: $NLPIR_DATA_DIR/Data]"),
            ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("segment", sub)) => segment(sub),
        Some(("keywords", sub)) => keywords(sub),
        Some(("pos", sub)) => pos(sub),
        Some(("update", sub)) => {
            update(sub);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn io_args() -> [Arg; 5] {
    [
        Arg::new("input")
            .short('i')
            .long("input")
            .value_name("file")
            .help("Read original text from <file>."),
        Arg::new("output")
            .short('o')
            .long("output")
            .value_name("file")
            .help("Write results to <file>."),
        Arg::new("in_enc")
            .long("in-enc")
            .value_name("encoding")
            .default_value("UTF-8")
            .help("Encoding for input"),
        Arg::new("out_enc")
            .long("out-enc")
            .value_name("encoding")
            .default_value("UTF-8")
            .help("Encoding for output"),
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Write results as JSON"),
    ]
}

fn engine_args() -> [Arg; 6] {
    [
        Arg::new("engine")
            .short('e')
            .long("engine")
            .value_name("engine")
            .default_value("jieba")
            .help("Segmentation engine: [jieba|native]"),
        Arg::new("lib_dir")
            .long("lib-dir")
            .value_name("dir")
            .help("Directory holding the NLPIR library [default: $NLPIR_LIBRARY_DIR or lib]"),
        Arg::new("data_dir")
            .long("data-dir")
            .value_name("dir")
            .help("Directory holding NLPIR's Data directory [default: $NLPIR_DATA_DIR or .]"),
        Arg::new("encoding")
            .long("engine-enc")
            .value_name("encoding")
            .default_value("utf_8")
            .help("Encoding the native engine runs in: [utf_8|gbk|big5]"),
        Arg::new("pos_map")
            .long("pos-map")
            .value_name("map")
            .help("Native tag set: [ict2|ict1|pku2|pku1]"),
        Arg::new("algorithm")
            .long("algorithm")
            .value_name("algorithm")
            .default_value("tfidf")
            .help("jieba keyword ranking: [tfidf|textrank]"),
    ]
}

fn open_engine(matches: &ArgMatches) -> Result<Box<dyn Engine>, Box<dyn std::error::Error>> {
    let engine = matches.get_one::<String>("engine").unwrap().as_str();
    match engine {
        "jieba" => {
            let algorithm =
                KeywordAlgorithm::try_from(matches.get_one::<String>("algorithm").unwrap().as_str())?;
            Ok(Box::new(JiebaEngine::new().with_algorithm(algorithm)))
        }
        "native" => {
            let mut options = NlpirOptions::from_env();
            if let Some(dir) = matches.get_one::<String>("lib_dir") {
                options.lib_dir = PathBuf::from(dir);
            }
            if let Some(dir) = matches.get_one::<String>("data_dir") {
                options.data_dir = PathBuf::from(dir);
            }
            let encoding =
                EngineEncoding::try_from(matches.get_one::<String>("encoding").unwrap().as_str())?;
            options = options.with_encoding(encoding, EncodingErrors::Strict);
            if let Some(pos_map) = matches.get_one::<String>("pos_map") {
                options.pos_tag_set = Some(PosTagSet::try_from(pos_map.as_str())?);
            }
            Ok(Box::new(NlpirLibrary::open(&options)?))
        }
        _ => Err(format!("Invalid engine: {} (expected jieba or native)", engine).into()),
    }
}

fn segment(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let names = TagNames::try_from(matches.get_one::<String>("names").unwrap().as_str())?;
    let english = !matches.get_flag("chinese");
    let pos_tagging = !matches.get_flag("no_pos");
    let json = matches.get_flag("json");
    let delimiter = matches.get_one::<String>("delimiter").map(String::as_str);

    let mut options = if pos_tagging {
        FormatOptions::default()
    } else {
        FormatOptions::untagged()
    };
    options = options.with_names(names).with_english(english);
    if !json {
        options = options.with_delimiter(delimiter);
    }

    let input = read_input(matches)?;
    let nlpir = Nlpir::new(open_engine(matches)?);

    let mut output = String::new();
    for line in input.lines() {
        let tokens = nlpir.segment(line, &options)?;
        if json {
            output.push_str(&serde_json::to_string(&tokens)?);
        } else {
            let fields: Vec<String> = tokens
                .iter()
                .map(|token| match token.tag_str() {
                    Some(tag) => format!("{}/{}", token.surface, tag),
                    None => token.surface.clone(),
                })
                .collect();
            output.push_str(&fields.join(" "));
        }
        output.push('\n');
    }

    write_output(matches, &output)
}

fn keywords(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let max_words = *matches.get_one::<usize>("max_words").unwrap();
    let weighted = matches.get_flag("weighted");
    let json = matches.get_flag("json");

    let input = read_input(matches)?;
    let nlpir = Nlpir::new(open_engine(matches)?);
    let keywords = nlpir.get_key_words(&input, max_words, weighted)?;

    let output = if json {
        let mut output = serde_json::to_string_pretty(&keywords)?;
        output.push('\n');
        output
    } else {
        keywords
            .iter()
            .map(|keyword| match keyword.weight {
                Some(weight) => format!("{}\t{:.2}\n", keyword.word, weight),
                None => format!("{}\n", keyword.word),
            })
            .collect()
    };

    write_output(matches, &output)
}

fn pos(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let code = matches.get_one::<String>("code").unwrap();
    let granularity = Granularity::try_from(matches.get_one::<String>("names").unwrap().as_str())?;
    let english = !matches.get_flag("chinese");

    match get_pos_name(code, granularity, english, &ICTPOS) {
        Some(name) => println!("{}", name),
        None => {
            eprintln!("{RED}Unknown part of speech code: {}{RESET}", code);
            process::exit(1);
        }
    }
    Ok(())
}

fn update(matches: &ArgMatches) {
    let data_dir = match matches.get_one::<String>("data_dir") {
        Some(dir) => PathBuf::from(dir),
        None => NlpirOptions::from_env().data_dir.join("Data"),
    };

    let license = match fetch_license() {
        Ok(license) => license,
        Err(e) => {
            tracing::debug!("License download failed: {}", e);
            eprintln!("{RED}Error: unable to fetch newest license.{RESET}");
            process::exit(1);
        }
    };

    match license::install_license(&data_dir, &license) {
        Ok(true) => println!("License updated."),
        Ok(false) => println!("Your license is already up-to-date."),
        Err(e) => {
            tracing::debug!("Writing license to '{}' failed: {}", data_dir.display(), e);
            eprintln!("{RED}Error: unable to move license to data directory.{RESET}");
            process::exit(1);
        }
    }
}

fn fetch_license() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut response = reqwest::blocking::get(LICENSE_URL)?.error_for_status()?;
    let mut temp_file = tempfile::NamedTempFile::new()?;
    response.copy_to(&mut temp_file)?;
    Ok(fs::read(temp_file.path())?)
}

fn read_input(matches: &ArgMatches) -> Result<String, Box<dyn std::error::Error>> {
    let input_file = matches.get_one::<String>("input");
    let mut bytes = Vec::new();
    match input_file {
        Some(file_name) => {
            File::open(file_name)?.read_to_end(&mut bytes)?;
        }
        None => {
            eprintln!("{BLUE}Input text, <ctrl-z> or <ctrl-d> to submit:{RESET}");
            io::stdin().read_to_end(&mut bytes)?;
        }
    }

    let in_enc = matches.get_one::<String>("in_enc").unwrap().as_str();
    if in_enc.eq_ignore_ascii_case("UTF-8") {
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }
    let encoding = Encoding::for_label(in_enc.as_bytes())
        .ok_or_else(|| format!("Unsupported input encoding: {}", in_enc))?;
    let mut decoder = DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding))
        .build(&*bytes);
    let mut input = String::new();
    decoder.read_to_string(&mut input)?;
    Ok(input)
}

fn write_output(matches: &ArgMatches, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let output: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(file_name) => Box::new(File::create(Path::new(file_name))?),
        None => Box::new(io::stdout()),
    };
    let mut output_buf = BufWriter::new(output);

    let out_enc = matches.get_one::<String>("out_enc").unwrap().as_str();
    if out_enc.eq_ignore_ascii_case("UTF-8") {
        output_buf.write_all(text.as_bytes())?;
    } else {
        let encoding = Encoding::for_label(out_enc.as_bytes())
            .ok_or_else(|| format!("Unsupported output encoding: {}", out_enc))?;
        output_buf.write_all(&encoding.encode(text).0)?;
    }
    output_buf.flush()?;
    Ok(())
}
