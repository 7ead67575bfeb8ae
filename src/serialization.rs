//! On-disk dump of the two result sets.
//!
//! Format: `u32` half count, the halves, `u32` shape count, the shapes.
//! Shapes are stored as raw words in host byte order and both arrays are
//! sorted ascending, so the dump is a local artifact rather than a portable
//! archive.

use {
    crate::shape::{Shape, Word},
    std::{
        fs::File,
        io::{self, BufReader, BufWriter, Read, Write},
        path::Path,
    },
};

#[derive(Debug)]
pub struct ShapeSet {
    pub halves: Vec<Shape>,
    pub shapes: Vec<Shape>,
}

impl ShapeSet {
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.save_to(&mut file)?;
        file.flush()
    }

    pub fn load(path: impl AsRef<Path>) -> io::Result<ShapeSet> {
        Self::load_from(&mut BufReader::new(File::open(path)?))
    }

    pub fn save_to(&self, out: &mut impl Write) -> io::Result<()> {
        write_shapes(out, &self.halves)?;
        write_shapes(out, &self.shapes)
    }

    pub fn load_from(input: &mut impl Read) -> io::Result<ShapeSet> {
        Ok(ShapeSet {
            halves: read_shapes(input)?,
            shapes: read_shapes(input)?,
        })
    }
}

fn write_shapes(out: &mut impl Write, shapes: &[Shape]) -> io::Result<()> {
    let len: u32 = shapes.len().try_into().expect("set too large for the dump header");
    out.write_all(&len.to_ne_bytes())?;
    for shape in shapes {
        out.write_all(&shape.0.to_ne_bytes())?;
    }
    Ok(())
}

fn read_shapes(input: &mut impl Read) -> io::Result<Vec<Shape>> {
    let mut header = [0u8; 4];
    input.read_exact(&mut header)?;
    let len = u32::from_ne_bytes(header) as usize;

    let mut shapes = Vec::with_capacity(len);
    let mut word = [0u8; std::mem::size_of::<Word>()];
    for _ in 0..len {
        input.read_exact(&mut word)?;
        shapes.push(Shape(Word::from_ne_bytes(word)));
    }
    Ok(shapes)
}
