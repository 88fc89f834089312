//! Integration tests for cross-version task generation.
//!
//! Covers the reference scenario, the empty-catalog edge cases, and the
//! completeness / subset / determinism properties over random catalogs.

use std::collections::{BTreeSet, HashSet};

use crossver_core::{
    generate, CrossVersionError, CrossVersionGraph, ExecutionStrategy, GenerationConfig,
    GroupKind, StaticCatalogProvider, UnitFactory, UnitName, VersionCatalogProvider, VersionId,
};
use proptest::prelude::*;

fn generate_static(full: &[&str], quick: &[&str]) -> CrossVersionGraph {
    let provider = StaticCatalogProvider::new(full.iter().copied(), quick.iter().copied());
    generate(GenerationConfig::default(), provider).expect("generation succeeds")
}

fn names(graph: &CrossVersionGraph, versions: &[&str]) -> BTreeSet<UnitName> {
    versions
        .iter()
        .map(|v| {
            graph
                .unit_for_version(&VersionId::new(*v))
                .expect("unit exists")
                .name
                .clone()
        })
        .collect()
}

// ---- Reference scenario ----

#[test]
fn scenario_three_versions_two_quick() {
    let graph = generate_static(&["6.0", "6.1", "7.0"], &["6.1", "7.0"]);

    let unit_names: Vec<&str> = graph.unit_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(
        unit_names,
        vec![
            "gradle6.0CrossVersionTest",
            "gradle6.1CrossVersionTest",
            "gradle7.0CrossVersionTest",
        ]
    );

    assert_eq!(
        graph.all_versions().depends_on(),
        &names(&graph, &["6.0", "6.1", "7.0"])
    );
    assert_eq!(
        graph.quick_feedback().depends_on(),
        &names(&graph, &["6.1", "7.0"])
    );

    let old = graph.unit_for_version(&VersionId::new("6.0")).unwrap();
    assert!(!graph.quick_feedback().contains(&old.name));
}

#[test]
fn unit_names_are_derivable_from_version_alone() {
    let graph = generate_static(&["6.0", "6.1", "7.0"], &["7.0"]);
    let factory = UnitFactory::new(GenerationConfig::default());
    for unit in graph.units() {
        assert_eq!(factory.unit_name(&unit.target_version), unit.name);
        assert!(graph.unit(&factory.unit_name(&unit.target_version)).is_some());
    }
}

#[test]
fn units_carry_version_and_executer_properties() {
    let graph = generate_static(&["6.0", "7.0"], &[]);
    for unit in graph.units() {
        assert_eq!(
            unit.system_properties["org.gradle.integtest.versions"],
            unit.target_version.as_str()
        );
        assert_eq!(unit.system_properties["org.gradle.integtest.executer"], "forking");
        assert!(unit.description.contains(unit.target_version.as_str()));
    }
}

// ---- Edge cases ----

#[test]
fn empty_quick_set_yields_empty_quick_group() {
    let graph = generate_static(&["6.0", "6.1", "7.0"], &[]);
    assert!(graph.quick_feedback().is_empty());
    assert_eq!(graph.all_versions().len(), 3);
}

#[test]
fn empty_catalog_yields_empty_groups_without_error() {
    let graph = generate_static(&[], &[]);
    assert!(graph.is_empty());
    assert!(graph.all_versions().is_empty());
    assert!(graph.quick_feedback().is_empty());
    assert_eq!(graph.group(GroupKind::AllVersions).name, "allVersionsCrossVersionTests");
    assert_eq!(
        graph.group(GroupKind::QuickFeedback).name,
        "quickFeedbackCrossVersionTests"
    );
}

#[test]
fn quick_version_missing_from_full_fails_generation() {
    let provider = StaticCatalogProvider::new(["6.0", "6.1"], ["6.1", "8.0"]);
    match generate(GenerationConfig::default(), provider) {
        Err(CrossVersionError::InvalidQuickSubset { versions }) => {
            assert_eq!(versions, vec!["8.0".to_string()]);
        }
        other => panic!("expected InvalidQuickSubset, got {:?}", other),
    }
}

#[test]
fn duplicate_catalog_version_fails_generation() {
    let provider = StaticCatalogProvider::new(["6.0", "6.0"], Vec::<&str>::new());
    assert!(matches!(
        generate(GenerationConfig::default(), provider),
        Err(CrossVersionError::DuplicateVersion { .. })
    ));
}

struct UnreadableMetadata;

impl VersionCatalogProvider for UnreadableMetadata {
    fn full_versions(&self) -> crossver_core::Result<Vec<VersionId>> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "metadata gone").into())
    }

    fn quick_versions(&self) -> crossver_core::Result<BTreeSet<VersionId>> {
        Ok(BTreeSet::new())
    }
}

#[test]
fn provider_io_failure_aborts_as_catalog_unavailable() {
    let err = generate(GenerationConfig::default(), UnreadableMetadata).unwrap_err();
    assert!(matches!(err, CrossVersionError::CatalogUnavailable { .. }));
    assert!(err.to_string().contains("metadata gone"));
}

#[test]
fn group_units_resolve_to_owned_units() {
    let graph = generate_static(&["6.0", "6.1", "7.0"], &["6.1"]);
    let quick = graph.group_units(GroupKind::QuickFeedback);
    assert_eq!(quick.len(), 1);
    assert_eq!(quick[0].target_version, VersionId::new("6.1"));
}

// ---- Properties over random catalogs ----

fn catalog_strategy() -> impl Strategy<Value = (Vec<String>, BTreeSet<String>)> {
    prop::collection::vec("[0-9]{1,2}\\.[0-9]{1,2}(\\.[0-9])?", 0..24)
        .prop_map(|raw| {
            let mut seen = HashSet::new();
            raw.into_iter()
                .filter(|v| seen.insert(v.clone()))
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|full| {
            let len = full.len();
            (
                Just(full),
                prop::collection::vec(any::<bool>(), len..=len),
            )
        })
        .prop_map(|(full, picks)| {
            let quick = full
                .iter()
                .zip(picks)
                .filter(|(_, pick)| *pick)
                .map(|(v, _)| v.clone())
                .collect();
            (full, quick)
        })
}

fn generate_owned(full: &[String], quick: &BTreeSet<String>) -> CrossVersionGraph {
    let provider = StaticCatalogProvider::new(full.iter().cloned(), quick.iter().cloned());
    generate(GenerationConfig::default(), provider).expect("generation succeeds")
}

proptest! {
    #[test]
    fn one_unit_per_version((full, quick) in catalog_strategy()) {
        let graph = generate_owned(&full, &quick);

        prop_assert_eq!(graph.len(), full.len());
        let targets: HashSet<&VersionId> = graph.units().map(|u| &u.target_version).collect();
        prop_assert_eq!(targets.len(), full.len());
        for v in &full {
            prop_assert!(graph.unit_for_version(&VersionId::new(v.as_str())).is_some());
        }
    }

    #[test]
    fn groups_match_catalog_exactly((full, quick) in catalog_strategy()) {
        let graph = generate_owned(&full, &quick);

        let all: BTreeSet<UnitName> = graph.unit_names().iter().cloned().collect();
        prop_assert_eq!(graph.all_versions().depends_on(), &all);

        let expected_quick: BTreeSet<UnitName> = graph
            .units()
            .filter(|u| quick.contains(u.target_version.as_str()))
            .map(|u| u.name.clone())
            .collect();
        prop_assert_eq!(graph.quick_feedback().depends_on(), &expected_quick);
        prop_assert!(graph.quick_feedback().depends_on().is_subset(graph.all_versions().depends_on()));
    }

    #[test]
    fn generation_is_deterministic((full, quick) in catalog_strategy()) {
        let first = generate_owned(&full, &quick);
        let second = generate_owned(&full, &quick);

        prop_assert_eq!(first.fingerprint(), second.fingerprint());
        prop_assert_eq!(first.manifest(), second.manifest());
    }

    #[test]
    fn every_unit_forks((full, quick) in catalog_strategy()) {
        let graph = generate_owned(&full, &quick);
        prop_assert!(graph.units().all(|u| u.strategy == ExecutionStrategy::Forking));
    }
}
