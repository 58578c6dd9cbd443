//! Generate command implementation.

use clap::ValueEnum;
use sitemap_core::{Generator, Options, Url};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How input lines are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One location per line; blank lines and `#` comments are skipped.
    Lines,
    /// One JSON `Url` object per line.
    Jsonl,
}

/// Arguments of the generate command.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Input file, or `-` for stdin.
    pub input: PathBuf,
    /// Optional JSON options file.
    pub config: Option<PathBuf>,
    /// Output directory override.
    pub dir: Option<PathBuf>,
    /// Base file name override.
    pub filename: Option<String>,
    /// Base URL override.
    pub base_url: Option<String>,
    /// Entry limit override.
    pub max_urls: Option<i64>,
    /// Byte limit override.
    pub max_file_size: Option<i64>,
    /// Input format.
    pub format: InputFormat,
    /// Print the summary as JSON.
    pub json: bool,
}

/// Runs the generate command.
pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = load_options(args)?;
    debug!(?options, "resolved generator options");

    let reader: Box<dyn BufRead> = if args.input == Path::new("-") {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&args.input)
            .map_err(|e| format!("cannot open {}: {e}", args.input.display()))?;
        Box::new(BufReader::new(file))
    };

    let mut generator = Generator::new(options);
    generator.open()?;

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(url) = parse_line(&line, args.format)
            .map_err(|e| format!("line {}: {e}", number + 1))?
        {
            generator.add(&url)?;
        }
    }

    let summary = generator.close()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        info!(
            urls = summary.url_count,
            files = summary.files.len(),
            "generation complete"
        );
        for name in &summary.files {
            println!("{name}");
        }
        if let Some(index) = &summary.index {
            println!("{index} (index)");
        }
    }

    Ok(())
}

/// Builds options from the config file (if any) and flag overrides.
pub fn load_options(args: &GenerateArgs) -> Result<Options, Box<dyn std::error::Error>> {
    let mut options = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
            serde_json::from_str::<Options>(&text)
                .map_err(|e| format!("invalid config {}: {e}", path.display()))?
        }
        None => Options::default(),
    };

    if let Some(dir) = &args.dir {
        options.dir = dir.clone();
    }
    if let Some(filename) = &args.filename {
        options.filename = filename.clone();
    }
    if let Some(base_url) = &args.base_url {
        options.base_url = base_url.clone();
    }
    if let Some(max_urls) = args.max_urls {
        options.max_urls = max_urls;
    }
    if let Some(max_file_size) = args.max_file_size {
        options.max_file_size = max_file_size;
    }

    Ok(options)
}

/// Parses one input line. Returns `Ok(None)` for lines to skip.
pub fn parse_line(line: &str, format: InputFormat) -> Result<Option<Url>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match format {
        InputFormat::Lines if trimmed.starts_with('#') => Ok(None),
        InputFormat::Lines => Ok(Some(Url::new(trimmed))),
        InputFormat::Jsonl => serde_json::from_str(trimmed)
            .map(Some)
            .map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitemap_core::ChangeFreq;
    use tempfile::tempdir;

    fn args(input: PathBuf) -> GenerateArgs {
        GenerateArgs {
            input,
            config: None,
            dir: None,
            filename: None,
            base_url: None,
            max_urls: None,
            max_file_size: None,
            format: InputFormat::Lines,
            json: false,
        }
    }

    #[test]
    fn parse_plain_lines() {
        assert_eq!(
            parse_line("  https://example.com/  ", InputFormat::Lines).unwrap(),
            Some(Url::new("https://example.com/"))
        );
        assert_eq!(parse_line("", InputFormat::Lines).unwrap(), None);
        assert_eq!(parse_line("# comment", InputFormat::Lines).unwrap(), None);
    }

    #[test]
    fn parse_json_lines() {
        let url = parse_line(r#"{"loc": "/a", "changefreq": "weekly"}"#, InputFormat::Jsonl)
            .unwrap()
            .unwrap();
        assert_eq!(url.loc, "/a");
        assert_eq!(url.change_freq, Some(ChangeFreq::Weekly));

        assert!(parse_line("{not json", InputFormat::Jsonl).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("sitemap.json");
        fs::write(
            &config,
            r#"{"dir": "from-config", "filename": "cfg", "max_urls": 10}"#,
        )
        .unwrap();

        let mut args = args(PathBuf::from("-"));
        args.config = Some(config);
        args.filename = Some("flag".to_string());
        args.max_file_size = Some(4096);

        let options = load_options(&args).unwrap();
        assert_eq!(options.dir, PathBuf::from("from-config"));
        assert_eq!(options.filename, "flag");
        assert_eq!(options.max_urls, 10);
        assert_eq!(options.max_file_size, 4096);
    }

    #[test]
    fn run_writes_sitemaps() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("urls.txt");
        fs::write(&input, "/one\n\n# skipped\n/two\n/three\n").unwrap();

        let out = temp.path().join("out");
        let mut args = args(input);
        args.dir = Some(out.clone());
        args.filename = Some("site".to_string());
        args.max_urls = Some(2);

        run(&args).unwrap();

        assert!(out.join("site-1.xml").exists());
        assert!(out.join("site-2.xml").exists());
        assert!(out.join("site.xml").exists());
    }

    #[test]
    fn run_reports_bad_line_number() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("urls.jsonl");
        fs::write(&input, "{\"loc\": \"/ok\"}\nnope\n").unwrap();

        let mut args = args(input);
        args.dir = Some(temp.path().join("out"));
        args.format = InputFormat::Jsonl;

        let err = run(&args).unwrap_err();
        assert!(err.to_string().starts_with("line 2:"));
    }
}
