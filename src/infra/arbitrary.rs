use std::fmt;

use arbitrary::{Arbitrary, Unstructured};

use crate::{
    core::{Error, Weight},
    graph::GraphBuilder,
    source::Row,
};

/// Index into a small pool of vertex names, so that generated operations hit
/// existing vertices often.
#[derive(Debug, Arbitrary, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Name(pub u8);

impl Name {
    const POOL: u8 = 24;

    pub fn get(&self) -> String {
        match self.0 % Self::POOL {
            // Empty names are rejected by the builder, which must be exercised
            // too.
            0 => String::new(),
            n => format!("v{n}"),
        }
    }
}

#[derive(Debug, Arbitrary, Clone)]
pub enum BuildOp {
    AddVertex(Name),
    AddEdge(Name, Name, Weight),
    AddRow(Name, Name, String),
}

impl BuildOp {
    pub fn apply(self, builder: &mut GraphBuilder) -> Result<(), Error> {
        match self {
            BuildOp::AddVertex(name) => {
                let name = name.get();
                if !name.is_empty() {
                    builder.add_vertex(&name);
                }
                Ok(())
            }
            BuildOp::AddEdge(source, destination, weight) => {
                builder.add_edge(&source.get(), &destination.get(), weight)
            }
            BuildOp::AddRow(source, destination, weight) => {
                let row = Row::new(builder.stats().rows + 1, source.get(), destination.get(), weight);
                builder.add_row(&row)
            }
        }
    }
}

pub struct BuildOpsSeq(pub Vec<BuildOp>);

impl IntoIterator for BuildOpsSeq {
    type Item = BuildOp;
    type IntoIter = std::vec::IntoIter<BuildOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl BuildOpsSeq {
    /// Prints the sequence as Rust code, for turning a fuzzer finding into a
    /// regression test.
    pub fn replay(self, builder: &mut GraphBuilder) {
        println!("let mut builder = GraphBuilder::new();");
        println!();

        for op in self {
            match &op {
                BuildOp::AddVertex(name) => println!("builder.add_vertex({:?});", name.get()),
                BuildOp::AddEdge(source, destination, weight) => println!(
                    "let _ = builder.add_edge({:?}, {:?}, {weight});",
                    source.get(),
                    destination.get()
                ),
                BuildOp::AddRow(source, destination, weight) => println!(
                    "let _ = builder.add_row(&Row::new({}, {:?}, {:?}, {weight:?}));",
                    builder.stats().rows + 1,
                    source.get(),
                    destination.get()
                ),
            }

            let _ = op.apply(builder);
        }

        println!();
        println!("check_consistency(&builder.build()).unwrap();");
    }
}

impl fmt::Debug for BuildOpsSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BuildOpsSeq(vec![")?;

        for op in self.0.iter() {
            writeln!(f, "    BuildOp::{:?},", op)?;
        }

        writeln!(f, "])")?;
        writeln!(f, ".replay(&mut builder);")
    }
}

impl<'a> Arbitrary<'a> for BuildOpsSeq {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let len = u.int_in_range(0..=512)?;
        let mut ops = Vec::with_capacity(len);

        for _ in 0..len {
            // Edges dominate, otherwise the graphs are mostly isolated
            // vertices.
            let op = match u.int_in_range(0..=9)? {
                0 => BuildOp::AddVertex(u.arbitrary()?),
                1 => BuildOp::AddRow(u.arbitrary()?, u.arbitrary()?, u.arbitrary()?),
                _ => BuildOp::AddEdge(u.arbitrary()?, u.arbitrary()?, u.int_in_range(0..=1000)?),
            };
            ops.push(op);
        }

        Ok(Self(ops))
    }
}
