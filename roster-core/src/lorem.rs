//! Placeholder text generation.

use rand::{Rng, seq::IndexedRandom};

const WORDS: &[&str] = &[
    "a", "ab", "abbas", "abduco", "absconditus", "accedo", "accusantium",
    "acer", "adeo", "adhuc", "adipisci", "admitto", "aedificium", "aeger",
    "aequitas", "aestas", "ago", "alias", "aliquam", "amet", "amitto",
    "amor", "animi", "antea", "aperiam", "apud", "aqua", "arbitro", "arca",
    "argumentum", "asper", "aspernatur", "assumenda", "atque", "audax",
    "aureus", "autem", "avarus", "beatae", "bellum", "benevolentia",
    "caelum", "calco", "candidus", "canto", "capillus", "casus", "causa",
    "celer", "cetera", "cibus", "civitas", "clamo", "coepi", "cognatus",
    "commodi", "conatus", "consequatur", "consequuntur", "copia", "corpus",
    "corrupti", "credo", "cresco", "culpa", "cum", "cupiditas", "curia",
    "debitis", "decor", "defendo", "delectus", "deleniti", "denique",
    "depono", "deserunt", "deus", "dicta", "dignissimos", "dolor",
    "dolore", "dolorem", "dolores", "doloribus", "ducimus", "ea", "earum",
    "eius", "eligendi", "enim", "eos", "error", "esse", "est", "et", "eum",
    "eveniet", "ex", "excepturi", "exercitationem", "expedita", "explicabo",
    "facere", "facilis", "fuga", "fugiat", "fugit", "harum", "hic", "id",
    "illo", "illum", "impedit", "in", "incidunt", "ipsa", "ipsam", "ipsum",
    "iste", "itaque", "iure", "iusto", "labore", "laboriosam", "laborum",
    "laudantium", "libero", "magnam", "magni", "maiores", "maxime",
    "minima", "minus", "modi", "molestiae", "mollitia", "nam", "natus",
    "necessitatibus", "nemo", "neque", "nesciunt", "nihil", "nisi", "nobis",
    "non", "nostrum", "nulla", "numquam", "obcaecati", "odio", "odit",
    "officia", "omnis", "optio", "pariatur", "perferendis", "perspiciatis",
    "placeat", "porro", "possimus", "praesentium", "provident", "quae",
    "quaerat", "quam", "quas", "quasi", "qui", "quia", "quibusdam", "quidem",
    "quis", "quisquam", "quo", "quod", "quos", "ratione", "recusandae",
    "reiciendis", "rem", "repellat", "repellendus", "reprehenderit",
    "repudiandae", "rerum", "saepe", "sapiente", "sed", "sequi", "similique",
    "sint", "sit", "soluta", "sunt", "suscipit", "tempora", "tempore",
    "temporibus", "tenetur", "totam", "ullam", "unde", "ut", "vel",
    "velit", "veniam", "veritatis", "vero", "vitae", "voluptas",
    "voluptate", "voluptatem", "voluptates", "voluptatum",
];

const SENTENCE_WORDS: std::ops::RangeInclusive<usize> = 3..=10;
const PARAGRAPH_SENTENCES: std::ops::RangeInclusive<usize> = 3..=6;

/// One random lorem word.
pub fn word<R: Rng>(rng: &mut R) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or("lorem")
}

/// A capitalised sentence of 3 to 10 words ending in a full stop.
pub fn sentence<R: Rng>(rng: &mut R) -> String {
    let count = rng.random_range(SENTENCE_WORDS);
    let mut out = String::new();
    for index in 0..count {
        let word = word(rng);
        if index == 0 {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        } else {
            out.push(' ');
            out.push_str(word);
        }
    }
    out.push('.');
    out
}

/// Three to six sentences joined by spaces.
pub fn paragraph<R: Rng>(rng: &mut R) -> String {
    let count = rng.random_range(PARAGRAPH_SENTENCES);
    (0..count)
        .map(|_| sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `count` paragraphs separated by newlines.
pub fn paragraphs<R: Rng>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| paragraph(rng))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn sentence_is_capitalised_and_terminated() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let s = sentence(&mut rng);
            assert!(s.ends_with('.'));
            assert!(s.chars().next().unwrap().is_uppercase());
            let words = s.split(' ').count();
            assert!(SENTENCE_WORDS.contains(&words), "{s}");
        }
    }

    #[test]
    fn paragraphs_are_newline_separated() {
        let mut rng = StdRng::seed_from_u64(1);
        let text = paragraphs(&mut rng, 4);
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().all(|line| !line.is_empty()));
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = paragraph(&mut StdRng::seed_from_u64(42));
        let b = paragraph(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
