//! Inspect command implementation.

use serde::Serialize;
use sitemap_core::naming::parse_name;
use std::fs;
use std::path::Path;

/// Result of inspecting the files for one base name.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Directory inspected.
    pub dir: String,
    /// Base file name.
    pub filename: String,
    /// Matching files, ordered by suffix (unsuffixed last).
    pub files: Vec<FileStats>,
    /// Sum of entries across urlset files.
    pub total_urls: usize,
    /// Sum of file sizes in bytes.
    pub total_size: u64,
}

/// Statistics for a single sitemap file.
#[derive(Debug, Serialize)]
pub struct FileStats {
    /// File name.
    pub name: String,
    /// `urlset` or `index`.
    pub kind: &'static str,
    /// Size in bytes.
    pub size: u64,
    /// Number of `<url>` or `<sitemap>` entries.
    pub entries: usize,
}

/// Runs the inspect command.
pub fn run(dir: &Path, filename: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let result = inspect(dir, filename)?;

    if result.files.is_empty() {
        return Err(format!("no sitemap files for {filename:?} in {}", dir.display()).into());
    }

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

/// Collects statistics for every file belonging to `filename` in `dir`.
pub fn inspect(dir: &Path, filename: &str) -> Result<InspectResult, Box<dyn std::error::Error>> {
    let mut matched = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(suffix) = parse_name(filename, &name) {
            matched.push((suffix, name));
        }
    }
    // Suffixed parts first, in numeric order; the base name last
    matched.sort_by_key(|(suffix, _)| suffix.unwrap_or(usize::MAX));

    let mut files = Vec::with_capacity(matched.len());
    for (_, name) in matched {
        let text = fs::read_to_string(dir.join(&name))?;
        let (kind, entries) = if text.contains("<sitemapindex") {
            ("index", text.matches("<sitemap>").count())
        } else {
            ("urlset", text.matches("<url>").count())
        };
        files.push(FileStats {
            name,
            kind,
            size: text.len() as u64,
            entries,
        });
    }

    Ok(InspectResult {
        dir: dir.display().to_string(),
        filename: filename.to_string(),
        total_urls: files
            .iter()
            .filter(|f| f.kind == "urlset")
            .map(|f| f.entries)
            .sum(),
        total_size: files.iter().map(|f| f.size).sum(),
        files,
    })
}

fn print_text_output(result: &InspectResult) {
    println!("Sitemap Inspection");
    println!("==================");
    println!();
    println!("Directory: {}", result.dir);
    println!("Base name: {}", result.filename);
    println!();
    println!("Files:");
    for file in &result.files {
        println!(
            "  {:<24} {:<7} {:>6} entries  {}",
            file.name,
            file.kind,
            file.entries,
            format_size(file.size)
        );
    }
    println!();
    println!("Total URLs: {}", result.total_urls);
    println!("Total size: {}", format_size(result.total_size));
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitemap_core::{Generator, Options, Url};
    use tempfile::tempdir;

    #[test]
    fn inspect_multi_file_session() {
        let temp = tempdir().unwrap();
        let mut generator = Generator::new(Options::new(temp.path()).max_urls(2).filename("b"));
        generator.open().unwrap();
        for loc in ["/1", "/2", "/3"] {
            generator.add(&Url::new(loc)).unwrap();
        }
        generator.close().unwrap();
        // Unrelated file is ignored
        fs::write(temp.path().join("other.xml"), "<urlset></urlset>").unwrap();

        let result = inspect(temp.path(), "b").unwrap();
        let names: Vec<&str> = result.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b-1.xml", "b-2.xml", "b.xml"]);
        assert_eq!(result.files[2].kind, "index");
        assert_eq!(result.files[2].entries, 2);
        assert_eq!(result.total_urls, 3);
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn run_fails_without_files() {
        let temp = tempdir().unwrap();
        assert!(run(temp.path(), "missing", "text").is_err());
    }
}
