//! pwd command - Print the current virtual directory

use s3fs_core::PathContext;

use crate::output::Output;

pub struct Pwd<'a> {
    context: &'a PathContext,
}

impl<'a> Pwd<'a> {
    pub fn new(context: &'a PathContext) -> Self {
        Self { context }
    }

    pub fn execute(&self, out: &dyn Output) {
        out.write(&format!("{}\n", self.context));
    }
}
