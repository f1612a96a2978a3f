//! Financial period shorthand: "1H" -> "first half", "3Q" -> "third quarter".

use crate::graph::Graph;

pub fn financial_period() -> Graph {
    let halves = Graph::cross("1", "first").or(Graph::cross("2", "second"));
    let quarters = halves
        .clone()
        .or(Graph::cross("3", "third"))
        .or(Graph::cross("4", "fourth"));

    let half = halves.then(Graph::cross("H", " half"));
    let quarter = quarters.then(Graph::cross("Q", " quarter"));
    half.or(quarter)
}
