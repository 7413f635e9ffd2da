//! Bundled demo programs.

use pvm_types::{Environment, Node, Value};

/// A named program and, for statement programs, its initial environment.
pub struct Demo {
    pub name: &'static str,
    pub node: Node,
    pub environment: Option<Environment>,
}

pub fn all() -> Vec<Demo> {
    vec![
        Demo {
            name: "arithmetic",
            node: Node::add(Node::number(5), Node::mul(Node::number(10), Node::number(5))),
            environment: None,
        },
        Demo {
            name: "boolean",
            node: Node::not(Node::or(
                Node::lt(Node::number(5), Node::number(10)),
                Node::ge(Node::number(10), Node::number(22)),
            )),
            environment: None,
        },
        Demo {
            name: "assign",
            node: Node::assign("x", Node::add(Node::var("x"), Node::number(4))),
            environment: Some([("x", Value::Number(5))].into_iter().collect()),
        },
        Demo {
            name: "if-false",
            node: pick_r(Node::lt(Node::number(5), Node::number(4))),
            environment: Some(Environment::new()),
        },
        Demo {
            name: "if-true",
            node: pick_r(Node::lt(Node::number(4), Node::number(5))),
            environment: Some(Environment::new()),
        },
    ]
}

fn pick_r(condition: Node) -> Node {
    Node::if_else(
        condition,
        Node::assign("r", Node::boolean(true)),
        Node::assign("r", Node::boolean(false)),
    )
}
