//! Startup banner and usage guide.

use colored::*;

const ART: &str = r#"
                  .----.
      .---------. | == |
      |.-"""""-.| |----|
      || HOLMES|| | == |
      ||  GEO  || |----|
      |'-.....-'| |::::|
      `"")---(""` |___.|
     /:::::::::::\" _  "
    /:::=======:::\`\`\
    `"""""""""""""`  '-'
"#;

/// Builds the banner shown at startup.
///
/// Colors follow the `colored` crate's global switch, so the text is plain
/// when output is not a terminal or `NO_COLOR` is set.
pub fn banner_text() -> String {
    let art = ART
        .replace("HOLMES", &"HOLMES".red().bold().to_string())
        .replace(" GEO ", &format!(" {} ", "GEO".red().bold()));
    format!(
        "{}\n[#] {} - {} [#]\n",
        art.cyan().bold(),
        "HolmesGeo".red().bold(),
        "A Simple Tool for Geolocation Check".green().bold()
    )
}

/// Usage hints printed when no input method was given.
pub fn usage_guide() -> String {
    let guide = "\
Please provide a file with IP addresses to check:
  - Use --apache to extract IPs from an Apache log file.
  - Use --csv to extract IPs from a CSV file.
  - Input from stdin is detected automatically when using a pipe (|).
  - Use --check to check IPs or domains from a text file, one per line.

Usage examples:
  holmes_geo --apache access.log
  holmes_geo --csv file.csv --column source_ip
  cat ip.txt | holmes_geo
  echo -en \"1.1.1.1\\n8.8.8.8\" | holmes_geo --no-rdns
  holmes_geo --check list_ip.txt --virtot
";
    guide.cyan().to_string()
}
