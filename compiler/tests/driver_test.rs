use std::{
    fs,
    path::{Path, PathBuf},
};

use indoc::indoc;
use jack_compiler::driver::{collect_sources, output_path, run, Options};

const MAIN: &str = indoc! {"
    class Main {
        function void main() {
            do Output.printInt(1);
            return;
        }
    }
"};

const BROKEN: &str = indoc! {"
    class Broken {
        function void main() {
            return x;
        }
    }
"};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jackc_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn output_paths() {
    let source = Path::new("proj/Main.jack");
    assert_eq!(output_path(source, None, "", "vm"), Path::new("proj/Main.vm"));
    assert_eq!(
        output_path(source, Some(Path::new("out")), "T", "xml"),
        Path::new("out/MainT.xml")
    );
}

#[test]
fn directory_sources_are_sorted_and_filtered() {
    let dir = scratch_dir("collect");
    fs::write(dir.join("Zeta.jack"), MAIN).unwrap();
    fs::write(dir.join("Alpha.jack"), MAIN).unwrap();
    fs::write(dir.join("notes.txt"), "").unwrap();
    fs::create_dir(dir.join("nested.jack")).unwrap();

    let sources = collect_sources(&dir).unwrap();
    assert_eq!(sources, vec![dir.join("Alpha.jack"), dir.join("Zeta.jack")]);
    assert!(collect_sources(&dir.join("notes.txt")).is_err());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn compiles_a_directory_with_all_outputs() {
    let dir = scratch_dir("outputs");
    let out = dir.join("out");
    fs::write(dir.join("Main.jack"), MAIN).unwrap();

    let options = Options {
        xml: true,
        tokens: true,
        out_dir: Some(out.clone()),
    };
    let outputs = run(&dir, &options).unwrap();
    assert_eq!(outputs, vec![out.join("Main.vm")]);

    let vm = fs::read_to_string(out.join("Main.vm")).unwrap();
    assert!(vm.starts_with("function Main.main 0\n"));
    let tree = fs::read_to_string(out.join("Main.xml")).unwrap();
    assert!(tree.starts_with("<class>"));
    let tokens = fs::read_to_string(out.join("MainT.xml")).unwrap();
    assert!(tokens.contains("<identifier> Output </identifier>"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn failed_files_write_nothing_but_others_compile() {
    let dir = scratch_dir("failures");
    fs::write(dir.join("Main.jack"), MAIN).unwrap();
    fs::write(dir.join("Broken.jack"), BROKEN).unwrap();

    let err = run(&dir, &Options::default()).unwrap_err();
    assert_eq!(err.to_string(), "1 of 2 files failed to compile");
    assert!(dir.join("Main.vm").exists());
    assert!(!dir.join("Broken.vm").exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn failed_write_leaves_no_partial_outputs() {
    let dir = scratch_dir("partial");
    fs::write(dir.join("Main.jack"), MAIN).unwrap();
    // A directory where the parse tree's staging file would go.
    fs::create_dir(dir.join("Main.xml.tmp")).unwrap();

    let options = Options {
        xml: true,
        ..Options::default()
    };
    assert!(run(&dir, &options).is_err());
    assert!(!dir.join("Main.vm").exists());
    assert!(!dir.join("Main.vm.tmp").exists());
    assert!(!dir.join("Main.xml").exists());
    fs::remove_dir_all(&dir).unwrap();
}
