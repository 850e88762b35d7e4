use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Event-log region names and the catalog names they correspond to.
///
/// The catalog spells regions in a transliterated English vocabulary that
/// cannot be derived from the log spelling, so the pairs are listed by hand.
const CURATED_PAIRS: [(&str, &str); 26] = [
    ("Вінницька область", "Vinnytsya"),
    ("Волинська область", "Volyn"),
    ("Дніпропетровська область", "Dnipropetrovs'k"),
    ("Донецька область", "Donets'k"),
    ("Житомирська область", "Zhytomyr"),
    ("Закарпатська область", "Transcarpathia"),
    ("Запорізька область", "Zaporizhzhya"),
    ("Івано-Франківська область", "Ivano-Frankivs'k"),
    ("Київська область", "Kiev"),
    ("Кіровоградська область", "Kirovohrad"),
    ("Луганська область", "Luhans'k"),
    ("Львівська область", "L'viv"),
    ("Миколаївська область", "Mykolayiv"),
    ("Одеська область", "Odessa"),
    ("Полтавська область", "Poltava"),
    ("Рівненська область", "Rivne"),
    ("Сумська область", "Sumy"),
    ("Тернопільська область", "Ternopil'"),
    ("Харківська область", "Kharkiv"),
    ("Херсонська область", "Kherson"),
    ("Хмельницька область", "Khmel'nyts'kyy"),
    ("Черкаська область", "Cherkasy"),
    ("Чернівецька область", "Chernivtsi"),
    ("Чернігівська область", "Chernihiv"),
    ("м. Київ", "Kiev City"),
    ("АР Крим", "Crimea"),
];

static CURATED: Lazy<RegionMapping> = Lazy::new(|| RegionMapping::from_pairs(CURATED_PAIRS));

/// Bidirectional lookup between log names and catalog names.
///
/// Pairs keep their insertion order. The forward map holds the last catalog
/// name given for a log name; the reverse index holds the first log name
/// that maps to each catalog name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionMapping {
    pairs: Vec<(String, String)>,
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
}

impl RegionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hand-maintained table for the Ukrainian first-level regions.
    pub fn curated() -> &'static RegionMapping {
        &CURATED
    }

    pub fn from_pairs<I, L, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, C)>,
        L: Into<String>,
        C: Into<String>,
    {
        let mut mapping = Self::new();
        for (log_name, catalog_name) in pairs {
            mapping.insert(log_name, catalog_name);
        }
        mapping
    }

    /// Map `log_name` to `catalog_name`, replacing any earlier target of
    /// `log_name`.
    ///
    /// The reverse lookup of a catalog name stays on the first log name that
    /// still maps to it.
    pub fn insert(&mut self, log_name: impl Into<String>, catalog_name: impl Into<String>) {
        let (log_name, catalog_name) = (log_name.into(), catalog_name.into());
        let previous = self.forward.insert(log_name.clone(), catalog_name.clone());
        if let Some(previous) = previous.filter(|previous| *previous != catalog_name) {
            if self.reverse.get(&previous) == Some(&log_name) {
                self.reverse.remove(&previous);
                let successor = self
                    .pairs
                    .iter()
                    .find(|(l, c)| *c == previous && self.forward.get(l) == Some(c))
                    .map(|(l, _)| l.clone());
                if let Some(successor) = successor {
                    self.reverse.insert(previous, successor);
                }
            }
        }
        self.reverse
            .entry(catalog_name.clone())
            .or_insert_with(|| log_name.clone());
        self.pairs.push((log_name, catalog_name));
    }

    pub fn catalog_name(&self, log_name: &str) -> Option<&str> {
        self.forward.get(log_name).map(String::as_str)
    }

    pub fn log_name(&self, catalog_name: &str) -> Option<&str> {
        self.reverse.get(catalog_name).map(String::as_str)
    }

    pub fn contains_log_name(&self, log_name: &str) -> bool {
        self.forward.contains_key(log_name)
    }

    pub fn is_target(&self, catalog_name: &str) -> bool {
        self.reverse.contains_key(catalog_name)
    }

    /// Pairs in insertion order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(l, c)| (l.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Number of distinct log names, which can be below [`len`] when a
    /// log name was inserted twice.
    ///
    /// [`len`]: RegionMapping::len
    pub fn distinct_log_names(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
