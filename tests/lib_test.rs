//! Library integration tests.

use std::fs;

use reqz::packages::{parse_pip_list, InstalledPackages};
use reqz::requirements::{
    AddOutcome, RequirementCollection, Satisfaction, SatisfactionEngine, SatisfactionPolicy,
};
use reqz::ReqzError;
use tempfile::TempDir;

#[test]
fn error_types_are_public() {
    let err = ReqzError::DuplicateConflict {
        requirement: "six".into(),
    };
    assert!(err.to_string().contains("six"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> reqz::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use reqz::cli::{Cli, Commands};

    let cli = Cli::parse_from(["reqz", "packages", "--location"]);
    if let Some(Commands::Packages(args)) = cli.command {
        assert!(args.location);
    } else {
        panic!("Expected Packages command");
    }
}

#[test]
fn file_round_trip_through_collection() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("requirements.txt");
    fs::write(&path, "six\ndocopt >= 0.6.0\n").unwrap();

    let mut requirements = RequirementCollection::from_file(&path).unwrap();
    assert_eq!(
        requirements.add_or_replace("docopt>=0.6.2").unwrap(),
        AddOutcome::Replaced
    );
    assert_eq!(
        requirements.add_or_replace("attrs").unwrap(),
        AddOutcome::Added
    );
    requirements.write(&path).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "attrs\ndocopt >= 0.6.2\nsix\n"
    );
    assert!(!temp.path().join("requirements.txt.bak").exists());
}

#[test]
fn check_against_pip_output() {
    let pip_json = r#"[
        {"name": "docopt", "version": "0.6.2", "location": "/venv/lib"},
        {"name": "Six", "version": "1.16.0"}
    ]"#;
    let installed: InstalledPackages = parse_pip_list(pip_json).unwrap().into_iter().collect();
    let requirements =
        RequirementCollection::parse("docopt == 0.6.2\nsix >= 1.0, <= 1.10\nflask\n").unwrap();

    let any_of = SatisfactionEngine::new(&installed);
    let statuses = any_of.check_all(&requirements);
    assert!(statuses[0].satisfied());
    assert!(statuses[1].satisfied());
    assert_eq!(statuses[2].satisfaction, Satisfaction::NotInstalled);

    let all_of = SatisfactionEngine::new(&installed).with_policy(SatisfactionPolicy::AllOf);
    assert_eq!(
        all_of.status(requirements.iter().nth(1).unwrap()).satisfaction,
        Satisfaction::Unsatisfied
    );
}
