use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=assets/");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("logo.rs");
    let mut f = fs::File::create(&dest_path).unwrap();

    let logo_path = Path::new("assets").join("logo.txt");
    if !logo_path.exists() {
        writeln!(f, "pub const LOGO_LINES: &[&str] = &[];").unwrap();
        writeln!(f, "pub const LOGO_WIDTH: u16 = 0;").unwrap();
        return;
    }

    let content = fs::read_to_string(&logo_path).unwrap();

    // Trailing blank lines would only pad the header.
    let mut lines: Vec<&str> = content.lines().map(|l| l.trim_end()).collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    // Column count, not byte count: the art uses box-drawing characters.
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    writeln!(f, "pub const LOGO_LINES: &[&str] = &[").unwrap();
    for line in &lines {
        writeln!(f, "    {:?},", line).unwrap();
    }
    writeln!(f, "];").unwrap();
    writeln!(f, "pub const LOGO_WIDTH: u16 = {};", width).unwrap();
}
