use crate::common::sandbox::{Sandbox, sandbox};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use twig::StoreError;
use twig::areas::refs::{RefValue, Refs};
use twig::artifacts::branch::branch_name::{BranchName, RefName};
use twig::artifacts::objects::object_id::ObjectId;

mod common;

fn ref_name(name: &str) -> RefName {
    RefName::try_parse(name).unwrap()
}

#[rstest]
fn fresh_store_has_head_on_the_default_branch(sandbox: Sandbox) {
    let refs = sandbox.repository.refs();

    assert_eq!(
        refs.get_ref(&RefName::head(), false).unwrap(),
        Some(RefValue::Symbolic(ref_name("refs/heads/master")))
    );
    // the branch itself has no record until the first commit
    assert_eq!(refs.get_ref(&RefName::head(), true).unwrap(), None);
    assert_eq!(
        std::fs::read_to_string(sandbox.store_path().join("HEAD")).unwrap(),
        "ref: refs/heads/master\n"
    );
}

#[rstest]
fn updating_head_through_its_chain_moves_the_branch(sandbox: Sandbox) {
    let refs = sandbox.repository.refs();
    let oid = ObjectId::hash(b"commit");

    refs.update_ref(&RefName::head(), &RefValue::Direct(oid.clone()), true)
        .unwrap();

    assert_eq!(
        refs.get_ref(&ref_name("refs/heads/master"), false).unwrap(),
        Some(RefValue::Direct(oid.clone()))
    );
    assert!(refs.get_ref(&RefName::head(), false).unwrap().unwrap().is_symbolic());
    assert_eq!(
        std::fs::read_to_string(sandbox.store_path().join("refs/heads/master")).unwrap(),
        format!("{oid}\n")
    );
}

#[rstest]
fn updating_head_without_deref_detaches_it(sandbox: Sandbox) {
    let refs = sandbox.repository.refs();
    let oid = ObjectId::hash(b"detached");

    refs.update_ref(&RefName::head(), &RefValue::Direct(oid.clone()), false)
        .unwrap();

    assert_eq!(
        refs.get_ref(&RefName::head(), false).unwrap(),
        Some(RefValue::Direct(oid))
    );
    assert_eq!(refs.get_ref(&ref_name("refs/heads/master"), false).unwrap(), None);
    assert_eq!(sandbox.repository.get_branch_name().unwrap(), None);
}

#[rstest]
fn cyclic_chains_are_reported(sandbox: Sandbox) {
    let refs = sandbox.repository.refs();
    refs.update_ref(
        &ref_name("refs/heads/a"),
        &RefValue::Symbolic(ref_name("refs/heads/b")),
        false,
    )
    .unwrap();
    refs.update_ref(
        &ref_name("refs/heads/b"),
        &RefValue::Symbolic(ref_name("refs/heads/a")),
        false,
    )
    .unwrap();

    assert!(matches!(
        refs.get_ref(&ref_name("refs/heads/a"), true),
        Err(StoreError::CyclicRef { .. })
    ));
    // the immediate record is still readable
    assert!(refs.get_ref(&ref_name("refs/heads/a"), false).unwrap().is_some());
}

#[rstest]
fn delete_ref_removes_the_physical_record(sandbox: Sandbox) {
    let refs = sandbox.repository.refs();
    let tag = ref_name("refs/tags/release/v1");
    refs.update_ref(&tag, &RefValue::Direct(ObjectId::hash(b"v1")), false)
        .unwrap();

    refs.delete_ref(&tag, false).unwrap();

    assert_eq!(refs.get_ref(&tag, false).unwrap(), None);
    assert!(!sandbox.store_path().join("refs/tags/release").exists());
    assert!(sandbox.store_path().join("refs/tags").exists());
    assert!(matches!(
        refs.delete_ref(&tag, false),
        Err(StoreError::NotFound { .. })
    ));
}

#[rstest]
fn iter_refs_filters_by_prefix(sandbox: Sandbox) {
    let refs = sandbox.repository.refs();
    let oid = ObjectId::hash(b"tip");
    refs.update_ref(&RefName::head(), &RefValue::Direct(oid.clone()), true)
        .unwrap();
    refs.create_branch(&BranchName::try_parse("feature").unwrap(), oid.clone())
        .unwrap();
    refs.create_tag(&BranchName::try_parse("v1").unwrap(), oid.clone())
        .unwrap();

    let mut heads = refs
        .iter_refs("refs/heads/", true)
        .map(|entry| entry.unwrap().0.to_string())
        .collect::<Vec<_>>();
    heads.sort();
    assert_eq!(heads, vec!["refs/heads/feature", "refs/heads/master"]);

    let all = refs
        .iter_refs("", true)
        .map(|entry| entry.unwrap())
        .collect::<Vec<_>>();
    assert_eq!(all.len(), 4);
    assert!(all.iter().all(|(_, value)| value == &Some(RefValue::Direct(oid.clone()))));
}

#[rstest]
fn creating_an_existing_branch_fails(sandbox: Sandbox) {
    let refs = sandbox.repository.refs();
    let name = BranchName::try_parse("topic").unwrap();

    refs.create_branch(&name, ObjectId::hash(b"1")).unwrap();
    let err = refs.create_branch(&name, ObjectId::hash(b"2")).unwrap_err();

    assert!(err.to_string().contains("already exists"));
}

#[rstest]
fn creating_an_existing_tag_keeps_its_target(sandbox: Sandbox) {
    let refs = sandbox.repository.refs();
    let name = BranchName::try_parse("v1").unwrap();

    refs.create_tag(&name, ObjectId::hash(b"1")).unwrap();
    let err = refs.create_tag(&name, ObjectId::hash(b"2")).unwrap_err();

    assert!(matches!(
        &err,
        StoreError::InvalidRefName { name, reason }
            if name == "refs/tags/v1" && reason.contains("tag")
    ));
    assert_eq!(
        refs.read_oid(&name.to_tag_ref()).unwrap(),
        Some(ObjectId::hash(b"1"))
    );
    assert!(sandbox.store_path().join("refs.lock").is_file());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn deref_reaches_the_end_of_any_finite_chain(length in 1usize..8) {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());
        let oid = ObjectId::hash(format!("chain {length}").as_bytes());

        let names = (0..=length)
            .map(|index| ref_name(&format!("refs/heads/link{index}")))
            .collect::<Vec<_>>();
        for pair in names.windows(2) {
            refs.update_ref(&pair[0], &RefValue::Symbolic(pair[1].clone()), false).unwrap();
        }
        refs.update_ref(&names[length], &RefValue::Direct(oid.clone()), false).unwrap();

        prop_assert_eq!(
            refs.get_ref(&names[0], true).unwrap(),
            Some(RefValue::Direct(oid))
        );
        prop_assert_eq!(
            refs.get_ref(&names[0], false).unwrap(),
            Some(RefValue::Symbolic(names[1].clone()))
        );
    }
}
