use std::io::Cursor;
use std::sync::Arc;

use tweet_maxent::corpus::read_labeled;
use tweet_maxent::{store, Classifier, StopWords, Trainer, TrainingParams};

const STOPWORDS: &str = "a\nan\nand\nare\nas\nat\nbe\nbut\nby\nfor\nif\nin\nis\nit\nof\non\nor\nthe\nthis\nto\nwas\nwith\ni\nmy\nso\n";

const TWEETS: &str = "\
1\tLoving the new album, what a great sound
1\tGreat game tonight, love this team
1\tSuch a wonderful surprise, love it
1\tThe critics loved the film, great acting
1\tWhat a nice and wonderful day
0\tHated the ending, what a terrible film
0\tTerrible service, I hate waiting
0\tThe critics hated it, awful acting
0\tAwful weather again, hate this day
0\tWhat a terrible and awful game
";

fn main() -> tweet_maxent::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let stopwords = StopWords::from_reader(Cursor::new(STOPWORDS))?;
    let docs = read_labeled(Cursor::new(TWEETS))?;

    let params = TrainingParams::default();
    let model = Trainer::new(params).train_documents(&docs, &stopwords)?;

    let path = std::env::temp_dir().join("tweet-maxent-demo.model");
    store::save_to_path(&model, &path)?;
    let model = store::load_from_path(&path)?;

    for category in model.categories() {
        let top: Vec<String> = model
            .top_features(category, 3)
            .into_iter()
            .map(|(token, w)| format!("{token}:{w:.3}"))
            .collect();
        println!("category {category}: {}", top.join(" "));
    }

    let classifier = Classifier::new(Arc::new(model), stopwords);
    for tweet in [
        "Have a nice day!",
        "To everybody's surprise the critics hated it!",
    ] {
        let result = classifier.classify(tweet);
        let sentiment = result
            .sentiment()
            .map(|s| s.to_string())
            .unwrap_or_else(|| result.category.to_string());
        println!(" Tweet: {tweet}\tSentiment: {sentiment}\t[{}]", result.distribution);
    }

    let eval = classifier.evaluate(&docs);
    print!("{eval}");
    Ok(())
}
