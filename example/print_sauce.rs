use ansiview::{SauceRecord, extract};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Print SAUCE metadata from files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Files to read SAUCE information from
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Show comments if present
    #[arg(short, long)]
    comments: bool,

    /// Show raw header fields
    #[arg(short = 'r', long)]
    raw: bool,
}

fn main() {
    let args = Args::parse();
    let mut failed = false;

    for file in &args.files {
        let data = match fs::read(file) {
            Ok(data) => data,
            Err(err) => {
                eprintln!("Error reading file '{}': {}", file.display(), err);
                failed = true;
                continue;
            }
        };

        let (body, sauce) = extract(&data);
        match sauce {
            Some(sauce) => print_record(file, body.len(), &sauce, &args),
            None => println!("No SAUCE record found in '{}'", file.display()),
        }
    }

    if failed {
        process::exit(1);
    }
}

fn print_record(file: &std::path::Path, body_len: usize, sauce: &SauceRecord, args: &Args) {
    println!("SAUCE Information for '{}'", file.display());
    println!("{}", "=".repeat(60));

    if !sauce.title().is_empty() {
        println!("Title:    {}", sauce.title_text());
    }
    if !sauce.author().is_empty() {
        println!("Author:   {}", sauce.author_text());
    }
    if !sauce.group().is_empty() {
        println!("Group:    {}", sauce.group_text());
    }
    if !sauce.date().is_empty() {
        println!("Date:     {}", sauce.date());
    }
    println!("Type:     {}", sauce.data_type());
    println!("Body:     {body_len} bytes (declared {})", sauce.file_size());

    if let Some(caps) = sauce.character_capabilities() {
        println!();
        println!("Character File Information:");
        println!("  Format:     {:?}", caps.format);
        println!("  Dimensions: {}x{} (columns x rows)", caps.columns, caps.lines);
        if caps.ice_colors {
            println!("  iCE Colors: Yes");
        }
        println!("  Letter Spacing: {:?}", caps.letter_spacing);
        println!("  Aspect Ratio:   {:?}", caps.aspect_ratio);
        if let Some(font) = caps.font() {
            println!("  Font:       {font}");
        }
    }

    if args.comments && !sauce.comments().is_empty() {
        println!();
        println!("Comments ({}):", sauce.comments().len());
        println!("{}", "-".repeat(40));
        for (i, comment) in sauce.comment_lines().enumerate() {
            println!("{:3}: {}", i + 1, comment);
        }
    }

    if args.raw {
        let header = sauce.header();
        println!();
        println!("Raw SAUCE Data:");
        println!("{}", "-".repeat(40));
        println!("File Type:      {}", header.file_type);
        println!("TInfo1:         {}", header.t_info1);
        println!("TInfo2:         {}", header.t_info2);
        println!("TInfo3:         {}", header.t_info3);
        println!("TInfo4:         {}", header.t_info4);
        println!("TFlags:         0b{:08b} (0x{:02X})", header.t_flags, header.t_flags);
        if !header.t_info_s.is_empty() {
            println!("TInfoS:         {:?}", header.t_info_s);
        }
        println!("Record Size:    {} bytes", sauce.record_len());
    }
    println!();
}
