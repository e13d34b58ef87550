use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use uuid::Uuid;

/// Descriptive movie fields, keyed the way OMDb-style clients send them.
///
/// Every field is optional. As a request body this doubles as the partial
/// document for updates, where `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieFields {
    #[serde(rename = "Title", default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(rename = "Year", default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(rename = "Rated", default, deserialize_with = "lenient_text")]
    pub rated: Option<String>,
    #[serde(rename = "Released", default, deserialize_with = "lenient_text")]
    pub released: Option<String>,
    #[serde(rename = "Runtime", default, deserialize_with = "lenient_text")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default, deserialize_with = "lenient_text")]
    pub genre: Option<String>,
    #[serde(rename = "Director", default, deserialize_with = "lenient_text")]
    pub director: Option<String>,
    #[serde(rename = "Writer", default, deserialize_with = "lenient_text")]
    pub writer: Option<String>,
    #[serde(rename = "Actors", default, deserialize_with = "lenient_text")]
    pub actors: Option<String>,
    #[serde(rename = "Plot", default, deserialize_with = "lenient_text")]
    pub plot: Option<String>,
    #[serde(rename = "Language", default, deserialize_with = "lenient_text")]
    pub language: Option<String>,
    #[serde(rename = "Country", default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(rename = "Awards", default, deserialize_with = "lenient_text")]
    pub awards: Option<String>,
    #[serde(rename = "Poster", default, deserialize_with = "lenient_text")]
    pub poster: Option<String>,
    #[serde(rename = "Metascore", default, deserialize_with = "lenient_text")]
    pub metascore: Option<String>,
    #[serde(rename = "imdbRating", default, deserialize_with = "lenient_text")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes", default, deserialize_with = "lenient_text")]
    pub imdb_votes: Option<String>,
    #[serde(rename = "imdbID", default, deserialize_with = "lenient_text")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "lenient_text")]
    pub kind: Option<String>,
    #[serde(rename = "Response", default, deserialize_with = "lenient_text")]
    pub response: Option<String>,
    #[serde(rename = "Images", default)]
    pub images: Option<Vec<String>>,
}

impl MovieFields {
    /// Overwrite the fields present in `patch`, keeping the rest.
    pub fn merge(&mut self, patch: MovieFields) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(
                    if patch.$field.is_some() {
                        self.$field = patch.$field;
                    }
                )*
            };
        }

        take!(
            title, year, rated, released, runtime, genre, director, writer, actors, plot,
            language, country, awards, poster, metascore, imdb_rating, imdb_votes, imdb_id,
            kind, response, images,
        );
    }

    /// JSON object holding only the supplied fields (used as a JSONB merge patch)
    pub fn to_patch(&self) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            map.retain(|_, v| !v.is_null());
        }
        Ok(value)
    }
}

/// Accepts `"2021"`, `2021` or `true` for a text field; numbers and
/// booleans are kept as their JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        Num(Number),
        Bool(bool),
    }

    Ok(Option::<Text>::deserialize(deserializer)?.map(|text| match text {
        Text::Str(s) => s,
        Text::Num(n) => n.to_string(),
        Text::Bool(b) => b.to_string(),
    }))
}

/// A stored favourite movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: MovieFields,
}

impl Movie {
    pub fn new(fields: MovieFields) -> Self {
        Self { id: Uuid::new_v4(), fields }
    }
}
