use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    // Data files live under the crate directory so they are included in the
    // crate tarball and `cargo publish` works.
    let data_dir = Path::new(&manifest_dir).join("assets").join("data");

    compile_confusables(&data_dir, &out_dir);

    println!("cargo:rerun-if-changed=assets/data/confusables.txt");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Decode a space separated run of hex codepoints.
fn decode_codepoints(field: &str, line_no: usize) -> String {
    field
        .split_whitespace()
        .map(|token| {
            let cp = u32::from_str_radix(token, 16).unwrap_or_else(|e| {
                panic!("confusables.txt:{line_no}: bad codepoint '{token}': {e}")
            });
            char::from_u32(cp).unwrap_or_else(|| {
                panic!("confusables.txt:{line_no}: U+{cp:04X} is not a Unicode scalar value")
            })
        })
        .collect()
}

/// Render a string as a Rust literal made only of `\u{..}` escapes.
fn escape(s: &str) -> String {
    s.chars().map(|c| format!("\\u{{{:04X}}}", c as u32)).collect()
}

fn compile_confusables(data_dir: &Path, out_dir: &str) {
    let confusables_path = data_dir.join("confusables.txt");
    let content = fs::read_to_string(&confusables_path)
        .unwrap_or_else(|e| panic!("Failed to read confusables.txt: {e}"));

    let mut entries: Vec<(String, String)> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let data = line.split('#').next().unwrap_or("").trim();
        if data.is_empty() {
            continue;
        }
        let fields: Vec<&str> = data.split(';').collect();
        if fields.len() < 2 {
            panic!("confusables.txt:{line_no}: expected '<source> ; <skeleton>'");
        }
        let source = decode_codepoints(fields[0], line_no);
        let skeleton = decode_codepoints(fields[1], line_no);
        if source.is_empty() {
            panic!("confusables.txt:{line_no}: empty source sequence");
        }
        if let Some(first) = seen.insert(source.clone(), line_no) {
            panic!("confusables.txt:{line_no}: source already defined on line {first}");
        }
        entries.push((source, skeleton));
    }

    check_closure(&entries);

    let mut code = String::new();
    code.push_str("/// Auto-generated confusable character table: (source, skeleton).\n");
    code.push_str("pub const CONFUSABLE_TABLE: &[(&str, &str)] = &[\n");
    for (source, skeleton) in &entries {
        let (src, skel) = (escape(source), escape(skeleton));
        code.push_str(&format!("    (\"{src}\", \"{skel}\"),\n"));
    }
    code.push_str("];\n");
    let count = entries.len();
    code.push_str(&format!("\npub const CONFUSABLE_COUNT: usize = {count};\n"));

    let out_path = Path::new(out_dir).join("confusables_gen.rs");
    fs::write(&out_path, code).unwrap();
}

/// INVARIANT: rectification must be idempotent. A skeleton may never contain a
/// codepoint that begins a source, and every multi-codepoint source must begin
/// with a codepoint that is itself a source. Otherwise rectified output could
/// form a new match.
fn check_closure(entries: &[(String, String)]) {
    let mut starts: HashSet<char> = HashSet::new();
    let mut singles: HashSet<char> = HashSet::new();
    for (source, _) in entries {
        let mut chars = source.chars();
        if let Some(first) = chars.next() {
            starts.insert(first);
            if chars.next().is_none() {
                singles.insert(first);
            }
        }
    }

    for (source, skeleton) in entries {
        let first = source.chars().next().unwrap_or_default();
        if first.is_ascii() {
            panic!(
                "COMPILE ERROR: source U+{:04X} is ASCII; ASCII must stay canonical",
                first as u32
            );
        }
        if !singles.contains(&first) {
            panic!(
                "COMPILE ERROR: sequence starting with U+{:04X} has no single-codepoint entry",
                first as u32
            );
        }
        if let Some(c) = skeleton.chars().find(|c| starts.contains(c)) {
            panic!(
                "COMPILE ERROR: skeleton of U+{:04X} contains U+{:04X}, which starts a source",
                first as u32, c as u32
            );
        }
    }
}
