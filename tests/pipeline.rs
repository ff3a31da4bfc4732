use std::io::Cursor;
use std::sync::Arc;
use std::thread;

use tweet_maxent::corpus::read_labeled;
use tweet_maxent::{
    classify, store, Category, Classifier, Error, LabeledDocument, Sentiment, StopWords, Trainer,
    TrainingParams,
};

const REVIEWS: &str = "\
1\tI love this phone, great battery
1\tgreat screen and I love the camera
1\tlove it, great value
0\tterrible battery, I hate it
0\thate the screen, terrible support
0\tterrible value, hate this phone
";

fn review_stopwords() -> StopWords {
    StopWords::from_reader(Cursor::new("i\nthis\nit\nthe\nand\n")).unwrap()
}

fn review_model() -> tweet_maxent::Model {
    let docs = read_labeled(Cursor::new(REVIEWS)).unwrap();
    Trainer::default()
        .train_documents(&docs, &review_stopwords())
        .unwrap()
}

fn scenario() -> (tweet_maxent::Model, StopWords) {
    let docs = vec![
        LabeledDocument::new("1", "great wonderful day"),
        LabeledDocument::new("0", "terrible awful day"),
    ];
    let stopwords = StopWords::from_lines(["day"]);
    let params = TrainingParams::default().with_cutoff(1).with_iterations(30);
    let model = Trainer::new(params).train_documents(&docs, &stopwords).unwrap();
    (model, stopwords)
}

#[test]
fn scenario_vocabulary_and_categories() {
    let (model, _) = scenario();
    let tokens: Vec<&str> = model.vocabulary().iter().collect();
    assert_eq!(tokens, vec!["great", "wonderful", "terrible", "awful"]);
    assert_eq!(model.categories(), &[Category::from("1"), Category::from("0")]);
}

#[test]
fn scenario_reference_documents_fall_back_to_bias() {
    let (model, stopwords) = scenario();
    let baseline = classify(&model, "", &stopwords);

    for doc in ["Have a nice day!", "To everybody's surprise the critics hated it!"] {
        let result = classify(&model, doc, &stopwords);
        assert_eq!(result.distribution, baseline.distribution);
        for (_, p) in result.distribution.iter() {
            assert!((p - 0.5).abs() < 1e-9);
        }
    }
}

#[test]
fn scenario_overlapping_documents_split_by_polarity() {
    let (model, stopwords) = scenario();
    let positive = classify(&model, "What a great day!", &stopwords);
    let negative = classify(&model, "Such an awful day.", &stopwords);

    assert_eq!(positive.category, Category::from("1"));
    assert_eq!(negative.category, Category::from("0"));
    assert_ne!(positive.category, negative.category);
    assert!(positive.confidence() > 0.5);
    assert!(negative.confidence() > 0.5);
}

#[test]
fn empty_document_is_not_an_error() {
    let model = review_model();
    let result = classify(&model, "", &review_stopwords());
    assert_eq!(result.distribution.len(), 2);
    let total: f64 = result.distribution.iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-6);
}

#[test]
fn cutoff_two_drops_singletons() {
    let model = review_model();
    assert!(model.vocabulary().contains("love"));
    assert!(model.vocabulary().contains("phone"));
    assert!(!model.vocabulary().contains("camera"));
    assert!(!model.vocabulary().contains("support"));
    assert!(!model.vocabulary().contains("the"));
}

#[test]
fn trained_model_fits_and_generalizes() {
    let model = review_model();
    let classifier = Classifier::new(Arc::new(model), review_stopwords());

    let docs = read_labeled(Cursor::new(REVIEWS)).unwrap();
    let eval = classifier.evaluate(&docs);
    assert_eq!(eval.total, 6);
    assert_eq!(eval.correct, 6);

    assert_eq!(classifier.predict_sentiment("Great phone!"), Some(Sentiment::Positive));
    assert_eq!(classifier.predict_sentiment("I hate this"), Some(Sentiment::Negative));
}

#[test]
fn saved_model_classifies_identically() {
    let model = review_model();
    let stopwords = review_stopwords();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("maxEntropyModel");

    store::save_to_path(&model, &path).unwrap();
    let reloaded = store::load_from_path(&path).unwrap();
    assert_eq!(reloaded, model);

    for doc in [
        "love the battery",
        "terrible screen",
        "",
        "nothing in the vocabulary",
        "great value but I hate the phone",
    ] {
        let a = classify(&model, doc, &stopwords);
        let b = classify(&reloaded, doc, &stopwords);
        assert_eq!(a.category, b.category);
        for ((_, pa), (_, pb)) in a.distribution.iter().zip(b.distribution.iter()) {
            assert!((pa - pb).abs() < 1e-12);
        }
    }
}

#[test]
fn missing_model_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = store::load_from_path(dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn truncated_model_file_is_rejected() {
    let model = review_model();
    let bytes = store::to_bytes(&model).unwrap();
    let err = store::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err, Error::CorruptModel(_)));
}

#[test]
fn training_is_reproducible() {
    assert_eq!(review_model(), review_model());
}

#[test]
fn model_is_shared_across_threads() {
    let classifier = Classifier::new(Arc::new(review_model()), review_stopwords());
    let expected = classifier.classify("love it").category;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let classifier = classifier.clone();
            thread::spawn(move || classifier.classify("love it").category)
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }

    let batch = classifier.classify_batch(&["love it", "hate it", ""]);
    assert_eq!(batch.len(), 3);
    assert_eq!(batch[0].category, expected);
}

#[test]
fn no_documents_no_model() {
    let err = Trainer::default().train_documents(&[], &StopWords::new()).unwrap_err();
    assert!(matches!(err, Error::InsufficientTrainingData(_)));
}
