use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("chronicle")
        .version("0.1.0")
        .author("Chronicle Contributors")
        .about("Turn a Facebook activity export into a static blog page")
        .arg(clap::arg!([INPUT] "Export HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file, or '-' for stdout")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-c --config <FILE> "TOML config file")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (html, json)")
                .default_value("html")
                .value_parser(["html", "json"]),
        )
        .arg(clap::arg!(--username <NAME> "Account display name used in post headings"))
        .arg(clap::arg!(--media_path <PATH> "Relative path media references are rewritten to"))
        .arg(clap::arg!(--max_title_length <NUM> "Maximum title length before truncation"))
        .arg(clap::arg!(--oldest_first "List the oldest posts first"))
        .arg(clap::arg!(--no_fix_paths "Keep media references as exported"))
        .arg(clap::arg!(--include_status "Include status updates"))
        .arg(clap::arg!(--no_photos "Leave out photo posts"))
        .arg(clap::arg!(--no_videos "Leave out video posts"))
        .arg(clap::arg!(--no_timestamp "Omit the timestamp from the generated file name"))
        .arg(clap::arg!(--inspect "Print the classification of every post section and exit"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        clap_complete::generate_to(shell, &mut cmd, "chronicle", &completions_dir).unwrap();
    }

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
