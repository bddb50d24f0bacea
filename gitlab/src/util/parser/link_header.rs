use crate::util::pagination::{LinkRelation, Rel};
use nom::branch::alt;
use nom::bytes::complete::{take_until, take_while1};
use nom::character::complete::{char, multispace0};
use nom::multi::many0;
use nom::sequence::{delimited, preceded, separated_pair};
use nom::IResult;
use reqwest::Url;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Parses a complete Link HTTP header into its relations.
/// Link headers look like this:
///     <https://gitlab.com/api/v4/projects/1/issues?page=2&per_page=20>; rel="next", <...>; rel="last"
///
/// Entries that fail to parse are dropped.
pub(crate) fn link_headers(s: &str) -> Vec<LinkRelation> {
    let mut out = vec![];
    for entry in split_entries(s) {
        match link_header(entry) {
            Ok(relations) => out.extend(relations),
            Err(reason) => debug!(entry = entry.trim(), %reason, "dropping link header entry"),
        }
    }
    out
}

/// Parses a single link-header entry. An entry may name several relations
/// (`rel="next last"`), one [`LinkRelation`] is returned per name.
pub(crate) fn link_header(s: &str) -> Result<Vec<LinkRelation>, String> {
    let (_, (raw_url, args)) =
        parse_link(s).map_err(|_| "could not parse link-header".to_string())?;

    let url = Url::parse(raw_url).map_err(|e| format!("invalid url '{}': {}", raw_url, e))?;
    let page: u32 = get_param(&url, "page").ok_or("missing or invalid 'page'")?;
    let per_page: u32 = get_param(&url, "per_page").ok_or("missing or invalid 'per_page'")?;

    let rels: Vec<Rel> = get_arg(&args, "rel")
        .map(|rel| rel.split_whitespace().map(Rel::from).collect())
        .unwrap_or_default();
    if rels.is_empty() {
        return Err("missing 'rel'".to_string());
    }

    let params: BTreeMap<String, String> = args
        .iter()
        .filter(|(k, _)| !k.eq_ignore_ascii_case("rel"))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Ok(rels
        .into_iter()
        .map(|rel| LinkRelation {
            rel,
            url: url.clone(),
            page,
            per_page,
            params: params.clone(),
        })
        .collect())
}

/// Splits on the commas that separate entries, those outside a `<url>` and
/// outside a quoted parameter value and followed by a `<`.
fn split_entries(s: &str) -> Vec<&str> {
    let mut out = vec![];
    let mut start = 0;
    let mut in_url = false;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_quotes {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quotes = false,
                _ => {}
            }
            continue;
        }

        match c {
            '<' => in_url = true,
            '>' => in_url = false,
            '"' if !in_url => in_quotes = true,
            ',' if !in_url && s[i + 1..].trim_start().starts_with('<') => {
                out.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&s[start..]);
    out
}

/// Parses an encapsulated <url> in a link-header
fn parse_url(input: &str) -> IResult<&str, &str> {
    delimited(
        preceded(multispace0, char('<')),
        take_until(">"),
        char('>'),
    )(input)
}

fn parse_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || "!#$&+-.^_`|~*".contains(c))(input)
}

fn parse_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_until("\""), char('"'))(input)
}

fn parse_bare(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != ';' && c != ',')(input)
}

/// Parses a single link-header argument, `; key="value"` or `; key=value`
fn parse_argument(input: &str) -> IResult<&str, (&str, &str)> {
    preceded(
        delimited(multispace0, char(';'), multispace0),
        separated_pair(
            parse_token,
            delimited(multispace0, char('='), multispace0),
            alt((parse_quoted, parse_bare)),
        ),
    )(input)
}

/// Parses a link-header entry into its raw url and arguments
fn parse_link(input: &str) -> IResult<&str, (&str, Vec<(&str, &str)>)> {
    let (rem, url) = parse_url(input)?;
    let (rem, args) = many0(parse_argument)(rem)?;
    let (rem, _) = multispace0(rem)?;
    Ok((rem, (url, args)))
}

fn get_param<T: FromStr>(url: &Url, key: &str) -> Option<T> {
    for (k, val) in url.query_pairs() {
        if key == k {
            return val.parse().ok();
        }
    }
    None
}

fn get_arg<'a>(args: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
    args.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| *v)
}
