//! Fake post data for seeding and tests.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Author, CreatePostRequest, NewPost};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Damian", "Dennis", "Edsger", "Frances", "Grace",
    "Hedy", "Ivan", "Joan", "Ken", "Linus", "Margaret", "Niklaus", "Radia", "Sophie",
    "Tim", "Yukihiro",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Hopper", "Kay", "Knuth", "Lamport", "Lillard", "Liskov", "Lovelace", "McCarthy",
    "Perlman", "Ritchie", "Shannon", "Sutherland", "Thompson", "Torvalds", "Turing",
    "Wilson", "Wirth",
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
    "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna",
    "aliqua", "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation",
    "ullamco", "laboris", "nisi", "aliquip", "ex", "ea", "commodo", "consequat", "duis",
    "aute", "irure", "in", "reprehenderit", "voluptate", "velit", "esse", "cillum",
    "fugiat", "nulla", "pariatur",
];

pub fn first_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, FIRST_NAMES).to_string()
}

pub fn last_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, LAST_NAMES).to_string()
}

/// 4 to 10 words, capitalized, ending with a period.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let word_count = rng.gen_range(4..=10);
    let words: Vec<&str> = (0..word_count).map(|_| pick(rng, LOREM)).collect();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

/// 3 to 6 sentences.
pub fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let sentence_count = rng.gen_range(3..=6);
    (0..sentence_count)
        .map(|_| sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn author<R: Rng + ?Sized>(rng: &mut R) -> Author {
    Author::new(first_name(rng), last_name(rng))
}

pub fn generate_post_with<R: Rng + ?Sized>(rng: &mut R) -> NewPost {
    NewPost {
        author: author(rng),
        title: sentence(rng),
        content: paragraph(rng),
    }
}

pub fn generate_post() -> NewPost {
    generate_post_with(&mut rand::thread_rng())
}

pub fn generate_posts(count: usize) -> Vec<NewPost> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| generate_post_with(&mut rng)).collect()
}

/// A random, valid `POST /posts` body.
pub fn generate_create_request() -> CreatePostRequest {
    let post = generate_post();
    CreatePostRequest {
        title: post.title,
        author: post.author,
        content: post.content,
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or("lorem")
}
