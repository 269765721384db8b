use crate::helpers::{abc, ids, request};

#[tokio::test]
async fn excluded_providers_are_never_called() {
    let (remesa, [a, b, c]) = abc();
    let req = request().exclude("a").exclude("c").build().unwrap();

    let out = remesa.get_all_quotes(&req).await.unwrap();

    assert_eq!(out.providers_called, 1);
    assert_eq!(ids(&out.all_results), vec!["b"]);
    assert_eq!((a.calls(), b.calls(), c.calls()), (0, 1, 0));
}

#[tokio::test]
async fn unknown_exclusions_are_ignored() {
    let (remesa, _) = abc();
    let req = request().exclude_all(["zzz", "yyy"]).build().unwrap();

    let out = remesa.get_all_quotes(&req).await.unwrap();

    assert_eq!(out.providers_called, 3);
}

#[tokio::test]
async fn excluding_everyone_calls_nobody() {
    let (remesa, _) = abc();
    let req = request().exclude_all(["a", "b", "c"]).build().unwrap();

    let out = remesa.get_all_quotes(&req).await.unwrap();

    assert_eq!(out.providers_called, 0);
    assert!(out.all_results.is_empty());
    assert!(!out.success);
}

#[test]
fn registry_lists_active_in_registration_order() {
    let (remesa, _) = abc();
    let reg = remesa.registry();
    assert_eq!(reg.names(), vec!["a", "b", "c"]);
    assert_eq!(reg.len(), 3);
    assert!(reg.get("b").is_some());
    assert!(reg.get("zzz").is_none());

    let exclude = ["b".to_string()].into_iter().collect();
    let active: Vec<_> = reg.list_active(&exclude).iter().map(|p| p.name()).collect();
    assert_eq!(active, vec!["a", "c"]);
}
