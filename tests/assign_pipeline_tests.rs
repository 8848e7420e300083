//! Pipeline Integration Tests
//!
//! Writes small lineage tables to a temp directory, runs the full
//! load → assign → write pipeline, and checks the written table.

use akveg_taxon_codes::utils::read_string_csv;
use akveg_taxon_codes::{run, AssignerConfig, CodeAssigner, CodeError, CodeOverrides, TaxonRecord, TaxonomySources};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

const VASCULAR: &str = "\
name_adjudicated,status_adjudicated,category,level,native
Salix pulchra,accepted,Eudicot,species,yes
Salix pulcherrima,synonym,Eudicot,species,yes
Salix pulvinata,accepted,Eudicot,species,no
Salix,accepted,Eudicot,genus,yes
Salix glauca ssp. acutifolia,accepted,Eudicot,subspecies,yes
Carex aquatilis var. stans,accepted,Monocot,variety,yes
Calamagrostis,accepted,Monocot,genus,yes
Calamintha,accepted,Eudicot,genus,no
";

const BRYOPHYTE: &str = "\
name_adjudicated,status_adjudicated,category,level
Sphagnum fuscum,accepted,Moss,species
Sphagnum fuscum,accepted,Moss,species
";

const BRYOPHYTE_CLEAN: &str = "\
name_adjudicated,status_adjudicated,category,level
Sphagnum fuscum,accepted,Moss,species
Sphagnum fimbriatum,synonym,Moss,species
";

const LICHEN: &str = "\
name_adjudicated,status_adjudicated,category,level,photobiont
Cladonia rangiferina,accepted,Lichen,species,green
Cladonia rangiformis,spelling variant,Lichen,species,green
,,,,
";

fn write_sources(dir: &Path, bryophyte: &str) -> TaxonomySources {
    let vascular = dir.join("vascular.csv");
    let bryo = dir.join("bryophyte.csv");
    let lichen = dir.join("lichen.csv");
    fs::write(&vascular, VASCULAR).unwrap();
    fs::write(&bryo, bryophyte).unwrap();
    fs::write(&lichen, LICHEN).unwrap();
    TaxonomySources {
        vascular,
        bryophyte: bryo,
        lichen,
    }
}

fn codes_by_name(path: &Path) -> HashMap<String, String> {
    let df = read_string_csv(path).unwrap();
    let names = df.column("name_adjudicated").unwrap().str().unwrap();
    let codes = df.column("code").unwrap().str().unwrap();
    names
        .into_iter()
        .zip(codes.into_iter())
        .map(|(name, code)| (name.unwrap().to_string(), code.unwrap().to_string()))
        .collect()
}

#[test]
fn test_full_run_writes_unique_codes() {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_sources(dir.path(), BRYOPHYTE_CLEAN);
    let output = dir.path().join("taxonomy.csv");

    let report = run(&sources, &output, &AssignerConfig::default()).unwrap();
    assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);
    assert_eq!(report.total_rows, 12);

    let codes = codes_by_name(&output);
    assert_eq!(codes.len(), 12);
    assert_eq!(codes["Salix pulchra"], "salpulc");
    assert_eq!(codes["Salix pulvinata"], "salpulv");
    assert_eq!(codes["Salix pulcherrima"], "salpul3");
    assert_eq!(codes["Salix"], "salix");
    assert_eq!(codes["Salix glauca ssp. acutifolia"], "salglasacu");
    assert_eq!(codes["Carex aquatilis var. stans"], "caraquvsta");
    assert_eq!(codes["Calamagrostis"], "calamagr");
    assert_eq!(codes["Calamintha"], "calamint");
    assert_eq!(codes["Sphagnum fuscum"], "sphfus");
    assert_eq!(codes["Sphagnum fimbriatum"], "sphfim");
    assert_eq!(codes["Cladonia rangiferina"], "claran");
    assert_eq!(codes["Cladonia rangiformis"], "claran2");

    let unique: BTreeSet<&String> = codes.values().collect();
    assert_eq!(unique.len(), codes.len());
}

#[test]
fn test_pass_through_columns_survive_merge() {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_sources(dir.path(), BRYOPHYTE_CLEAN);
    let output = dir.path().join("taxonomy.csv");

    run(&sources, &output, &AssignerConfig::default()).unwrap();

    let df = read_string_csv(&output).unwrap();
    let columns: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    assert_eq!(
        columns,
        vec!["name_adjudicated", "status_adjudicated", "category", "level", "native", "photobiont", "code"]
    );
}

#[test]
fn test_errors_block_output() {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_sources(dir.path(), BRYOPHYTE);
    let output = dir.path().join("taxonomy.csv");

    let report = run(&sources, &output, &AssignerConfig::default()).unwrap();

    assert!(!report.is_clean());
    assert!(!output.exists());
    assert!(report
        .errors
        .iter()
        .any(|err| matches!(err, CodeError::DuplicateName { name, count: 2 } if name == "Sphagnum fuscum")));
}

#[test]
fn test_parquet_output() {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_sources(dir.path(), BRYOPHYTE_CLEAN);
    let output = dir.path().join("taxonomy.parquet");

    let report = run(&sources, &output, &AssignerConfig::default()).unwrap();
    assert!(report.is_clean());
    assert!(fs::metadata(&output).unwrap().len() > 0);
}

#[test]
fn test_override_file_pins_code() {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_sources(dir.path(), BRYOPHYTE_CLEAN);
    let overrides_path = dir.path().join("overrides.csv");
    fs::write(&overrides_path, "name_adjudicated,code\nCladonia rangiformis,CLARANF\n").unwrap();
    let output = dir.path().join("taxonomy.csv");

    let config = AssignerConfig {
        overrides: CodeOverrides::load_csv(&overrides_path, "name_adjudicated", "code").unwrap(),
        ..AssignerConfig::default()
    };
    let report = run(&sources, &output, &config).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.pinned_rows, 1);

    let codes = codes_by_name(&output);
    assert_eq!(codes["Cladonia rangiformis"], "claranf");
    assert_eq!(codes["Cladonia rangiferina"], "claran");
}

fn sample_records() -> Vec<TaxonRecord> {
    vec![
        TaxonRecord::new("Salix pulchra", "accepted", "Eudicot", "species"),
        TaxonRecord::new("Salix pulcherrima", "synonym", "Eudicot", "species"),
        TaxonRecord::new("Salix pulchella", "misapplied", "Eudicot", "species"),
        TaxonRecord::new("Salix pulvinata", "accepted", "Eudicot", "species"),
        TaxonRecord::new("Salix", "accepted", "Eudicot", "genus"),
        TaxonRecord::new("Salix glauca ssp. acutifolia", "accepted", "Eudicot", "subspecies"),
        TaxonRecord::new("Salix glauca ssp. acuta", "synonym", "Eudicot", "subspecies"),
        TaxonRecord::new("Cladonia rangiferina", "accepted", "Lichen", "species"),
        TaxonRecord::new("Cladonia rangiformis", "historic", "Lichen", "species"),
        TaxonRecord::new("Sphagnum fuscum", "accepted", "Moss", "species"),
        TaxonRecord::new("Sphagnum fuscescens", "synonym", "Moss", "species"),
        TaxonRecord::new("Betula nana × glandulosa", "hybrid origin", "Eudicot", "hybrid"),
    ]
}

fn name_code_pairs(records: &[TaxonRecord]) -> BTreeSet<(String, String)> {
    let codes = CodeAssigner::default().assign(records).into_codes().unwrap();
    records
        .iter()
        .map(|record| record.name.clone())
        .zip(codes)
        .collect()
}

#[test]
fn test_repeat_runs_identical() {
    let records = sample_records();
    let first = CodeAssigner::default().assign(&records).into_codes().unwrap();
    let second = CodeAssigner::default().assign(&records).into_codes().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_shuffled_input_same_pairs() {
    let records = sample_records();
    let expected = name_code_pairs(&records);

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let mut shuffled = records.clone();
        shuffled.shuffle(&mut rng);
        assert_eq!(name_code_pairs(&shuffled), expected);
    }
}

#[test]
fn test_synonym_suffix_positions() {
    let pairs: HashMap<String, String> = name_code_pairs(&sample_records()).into_iter().collect();

    // salpul group: pulchra, pulvinata (primary), then pulchella, pulcherrima (secondary, by name)
    assert_eq!(pairs["Salix pulchella"], "salpul3");
    assert_eq!(pairs["Salix pulcherrima"], "salpul4");
    assert_eq!(pairs["Salix pulchra"], "salpulc");
    assert_eq!(pairs["Salix pulvinata"], "salpulv");

    assert_eq!(pairs["Salix glauca ssp. acuta"], "salglasacu2");
    assert_eq!(pairs["Salix glauca ssp. acutifolia"], "salglasacu");
    assert_eq!(pairs["Sphagnum fuscescens"], "sphfus2");
    assert_eq!(pairs["Betula nana × glandulosa"], "betn×g");
}
