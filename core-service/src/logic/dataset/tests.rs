use super::{DatasetError, Label, LabeledExample, TrainingCorpus};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_jsonl_preserves_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.jsonl");
    fs::write(
        &path,
        "{\"url\": \"http://paypal.com.phish.co/login\", \"label\": 1}\n\
         \n\
         {\"url\": \"https://google.com\", \"label\": 0}\n",
    )
    .unwrap();

    let corpus = TrainingCorpus::load_jsonl(&path).unwrap();

    assert_eq!(corpus.len(), 2);
    let urls: Vec<_> = corpus.urls().collect();
    assert_eq!(urls, vec!["http://paypal.com.phish.co/login", "https://google.com"]);
    assert_eq!(corpus.labels(), vec![Label::Phishing, Label::Legitimate]);
}

#[test]
fn test_load_jsonl_reports_bad_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.jsonl");
    fs::write(
        &path,
        "{\"url\": \"https://google.com\", \"label\": 0}\n{\"url\": 42}\n",
    )
    .unwrap();

    match TrainingCorpus::load_jsonl(&path) {
        Err(DatasetError::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_load_jsonl_rejects_unknown_label() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.jsonl");
    fs::write(&path, "{\"url\": \"https://google.com\", \"label\": 2}\n").unwrap();

    match TrainingCorpus::load_jsonl(&path) {
        Err(DatasetError::InvalidLabel { line, label }) => {
            assert_eq!(line, 1);
            assert_eq!(label, 2);
        }
        other => panic!("expected invalid label, got {:?}", other),
    }
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let result = TrainingCorpus::load_jsonl(dir.path().join("missing.jsonl"));
    assert!(matches!(result, Err(DatasetError::Io(_))));
}

#[test]
fn test_seed_corpus_has_both_classes() {
    let corpus = TrainingCorpus::seed();
    let counts = corpus.label_counts();

    assert_eq!(corpus.len(), 6);
    assert_eq!(counts.phishing, 3);
    assert_eq!(counts.legitimate, 3);
    assert!(counts.has_both_classes());
}

#[test]
fn test_from_pairs_keeps_alignment() {
    let corpus = TrainingCorpus::from_pairs(
        ["http://a.com", "http://b.com", "http://c.com"],
        &[Label::Phishing, Label::Legitimate, Label::Phishing],
    )
    .unwrap();

    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.examples()[1], LabeledExample::new("http://b.com", Label::Legitimate));
}

#[test]
fn test_from_pairs_rejects_unequal_lengths() {
    let result = TrainingCorpus::from_pairs(
        ["http://a.com", "http://b.com", "http://c.com"],
        &[Label::Phishing, Label::Legitimate],
    );

    match result {
        Err(DatasetError::LengthMismatch { urls, labels }) => {
            assert_eq!(urls, 3);
            assert_eq!(labels, 2);
        }
        other => panic!("expected length mismatch, got {:?}", other),
    }

    let result = TrainingCorpus::from_pairs(Vec::<String>::new(), &[Label::Phishing]);
    assert!(matches!(result, Err(DatasetError::LengthMismatch { urls: 0, labels: 1 })));
}

#[test]
fn test_label_conversions() {
    assert_eq!(Label::try_from(0), Ok(Label::Legitimate));
    assert_eq!(Label::try_from(1), Ok(Label::Phishing));
    assert_eq!(Label::try_from(7), Err(7));
    assert_eq!(Label::Phishing.as_target(), 1.0);
    assert_eq!(Label::Legitimate.to_string(), "legitimate");
}
