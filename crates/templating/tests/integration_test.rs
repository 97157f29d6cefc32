//! Integration tests for the templating pipeline.
//!
//! These go from catalog CSV and raw upstream JSON all the way to the
//! grouped messages the API returns.

use message_catalog::Catalog;
use movie_facts::{FactSheet, MovieFacts, RawMovieData};
use rand::SeedableRng;
use rand::rngs::StdRng;
use templating::{FailurePolicy, RenderError, TemplateEngine};

fn inception() -> RawMovieData {
    serde_json::from_value(serde_json::json!({
        "info": {
            "title": "Inception",
            "runtime": 148,
            "critics_consensus": "",
            "ratings": {"critics_score": 87},
            "release_dates": {"theater": "2010-07-16"},
            "abridged_cast": [
                {"name": "Leonardo DiCaprio"},
                {"name": "Joseph Gordon-Levitt"}
            ],
            "abridged_directors": [{"name": "Christopher Nolan"}]
        },
        "reviews": []
    }))
    .unwrap()
}

fn render(catalog_csv: &str, data: &RawMovieData) -> Result<templating::MessagesByTag, RenderError> {
    let catalog = Catalog::parse(catalog_csv).unwrap();
    let sheet =
        FactSheet::snapshot(&MovieFacts::new(data), &mut StdRng::seed_from_u64(5)).unwrap();
    TemplateEngine::new().render(&catalog, &sheet)
}

#[test]
fn test_end_to_end_single_entry() {
    let messages = render(
        "Tags,Message\nGently,{title} starring {actor} runs {runtime}.\n",
        &inception(),
    )
    .unwrap();

    assert_eq!(
        serde_json::to_value(&messages).unwrap(),
        serde_json::json!({
            "😌 Gently": ["Inception starring Leonardo DiCaprio runs 148 minutes."]
        })
    );
}

#[test]
fn test_every_placeholder_renders() {
    let messages = render(
        "Tags,Message\n\
         \"Aggressively, With a movie quote\",\"{title}|{director}|{runtime}|{releasedate}|{actor}|{actor2}|{review_q}|{review_pub}|{review_critic}|{rtblurb}|{rtscore}\"\n",
        &inception(),
    )
    .unwrap();

    let expected = "Inception|Christopher Nolan|148 minutes|July 16, 2010|Leonardo DiCaprio|\
                    Joseph Gordon-Levitt|Go see this movie!|\"Up Your Butt\"|your Mom|\
                    Inception has been called a film with a beginning, middle, AND end.|87%";
    assert_eq!(messages.get("😡 Aggressively").unwrap(), &[expected.to_string()]);
    assert_eq!(messages.get("🎬💬 With a movie quote").unwrap(), &[expected.to_string()]);
}

#[test]
fn test_catalog_with_two_aggressive_rows() {
    let messages = render(
        "Tags,Message\nAggressively,First {title}\nGently,Soft\nAggressively,Second {title}\n",
        &inception(),
    )
    .unwrap();

    assert_eq!(
        messages.get("😡 Aggressively").unwrap(),
        &["First Inception".to_string(), "Second Inception".to_string()]
    );
}

#[test]
fn test_single_actor_fails_only_templates_that_need_two() {
    let mut data = inception();
    data.info.abridged_cast.truncate(1);

    let ok = render("Tags,Message\nGently,{actor} is in {title}\n", &data).unwrap();
    assert_eq!(ok.message_count(), 1);

    let err = render("Tags,Message\nGently,{actor} and {actor2}\n", &data).unwrap_err();
    assert!(err.is_missing_fact());
}

#[test]
fn test_skip_policy_keeps_good_entries() {
    let mut data = inception();
    data.info.runtime = None;

    let catalog = Catalog::parse("Tags,Message\nGently,{runtime}\nGently,{title}\n").unwrap();
    let sheet =
        FactSheet::snapshot(&MovieFacts::new(&data), &mut StdRng::seed_from_u64(5)).unwrap();
    let messages = TemplateEngine::new()
        .with_policy(FailurePolicy::SkipEntry)
        .render(&catalog, &sheet)
        .unwrap();

    assert_eq!(messages.get("😌 Gently").unwrap(), &["Inception".to_string()]);
}
