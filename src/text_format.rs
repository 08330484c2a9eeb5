use std::fs;

use nom::IResult;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, multispace0, multispace1, not_line_ending};
use nom::combinator::map_res;
use nom::sequence::{preceded, tuple};

use crate::error::KmstError;
use crate::kmst::{Edge, NodeId, Weight};


/// reads an instance from file, returns (n, edges)
pub fn read_from_file(filename:&str) -> Result<(usize, Vec<Edge>), KmstError> {
    let s = fs::read_to_string(filename)
        .map_err(|source| KmstError::Io { filename: filename.to_string(), source })?;
    parse_instance(s.as_str())
}

/** parses an instance:
```text
c optional comments
<n>
<m>
<node1> <node2> <weight>   (m times)
```
*/
pub fn parse_instance(s:&str) -> Result<(usize, Vec<Edge>), KmstError> {
    let s = s.replace("\r", "");
    let (s2, _) = skip_comments(s.as_str()).map_err(parse_error)?;
    let (mut s3, (n, m)) = read_header(s2).map_err(parse_error)?;
    let mut edges = Vec::with_capacity(m);
    while let Ok((tmp, e)) = read_edge(s3) {
        s3 = tmp;
        edges.push(e);
    }
    if !s3.trim().is_empty() {
        let line = s3.trim_start().lines().next().unwrap_or_default();
        return Err(KmstError::Parse(format!("unexpected content after edge {}: '{}'", edges.len(), line)));
    }
    if edges.len() != m {
        return Err(KmstError::Parse(format!("header announces {} edges, found {}", m, edges.len())));
    }
    Ok((n, edges))
}

/** writes an instance in the text format */
pub fn instance_to_string(n:usize, edges:&[Edge]) -> String {
    let mut res = format!("{}\n{}\n", n, edges.len());
    for e in edges {
        res += format!("{} {} {}\n", e.node1, e.node2, e.weight).as_str();
    }
    res
}

/** writes an instance into a file (text format) */
pub fn write_to_file(filename:&str, n:usize, edges:&[Edge]) -> Result<(), KmstError> {
    fs::write(filename, instance_to_string(n, edges))
        .map_err(|source| KmstError::Io { filename: filename.to_string(), source })
}

fn parse_error(e:nom::Err<nom::error::Error<&str>>) -> KmstError {
    KmstError::Parse(format!("{:?}", e))
}

/// skips a single comment line
fn skip_comment(s:&str) -> IResult<&str, &str> {
    preceded(multispace0, preceded(tag("c"), not_line_ending))(s)
}

/// skips all comments
pub fn skip_comments(s:&str) -> IResult<&str, Vec<&str>> {
    nom::multi::many0(skip_comment)(s)
}

fn read_usize(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

fn read_weight(s:&str) -> IResult<&str, Weight> {
    map_res(digit1, |d:&str| d.parse::<Weight>())(s)
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    tuple((
        preceded(multispace0, read_usize),
        preceded(multispace1, read_usize),
    ))(s)
}

/// reads an edge line (node indices start at 0)
pub fn read_edge(s:&str) -> IResult<&str, Edge> {
    let (remaining, (a, b, w)):(&str, (NodeId, NodeId, Weight)) = tuple((
        preceded(multispace1, read_usize),
        preceded(multispace1, read_usize),
        preceded(multispace1, read_weight),
    ))(s)?;
    Ok((remaining, Edge::new(a, b, w)))
}
