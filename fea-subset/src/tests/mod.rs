
use crate::{Feature, Statement, Substitution};

static CCMP: &str = "./test-data/ccmp.fea";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn load_ccmp() -> Feature {
    init_logging();
    assert!(
        std::path::Path::new(CCMP).exists(),
        "test data is missing. cwd: '{:?}'",
        std::env::current_dir()
    );
    let text = std::fs::read_to_string(CCMP).unwrap();
    Feature::parse(&text).unwrap()
}

/// Every rule in `statements`, including those inside lookup blocks.
fn all_rules(statements: &[Statement]) -> Vec<&Substitution> {
    statements
        .iter()
        .flat_map(|statement| match statement {
            Statement::Rule(rule) => vec![rule],
            Statement::Lookup(lookup) => all_rules(lookup.statements()),
            _ => Vec::new(),
        })
        .collect()
}
