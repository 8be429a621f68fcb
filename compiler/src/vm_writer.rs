use derive_more::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    #[display(fmt = "constant")]
    Const,
    #[display(fmt = "argument")]
    Argument,
    #[display(fmt = "local")]
    Local,
    #[display(fmt = "static")]
    Static,
    #[display(fmt = "this")]
    This,
    #[display(fmt = "that")]
    That,
    #[display(fmt = "pointer")]
    Pointer,
    #[display(fmt = "temp")]
    Temp,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    #[display(fmt = "add")]
    Add,
    #[display(fmt = "sub")]
    Sub,
    #[display(fmt = "neg")]
    Neg,
    #[display(fmt = "eq")]
    Eq,
    #[display(fmt = "gt")]
    Gt,
    #[display(fmt = "lt")]
    Lt,
    #[display(fmt = "and")]
    And,
    #[display(fmt = "or")]
    Or,
    #[display(fmt = "not")]
    Not,
}

/// Append-only buffer of VM instructions, one per line.
#[derive(Debug, Default)]
pub struct VmWriter {
    out: String,
}

impl VmWriter {
    pub fn new() -> Self {
        VmWriter { out: String::new() }
    }

    fn write(&mut self, data: &str) {
        self.out.push_str(data);
        self.out.push('\n');
    }

    pub fn write_push(&mut self, seg: Segment, idx: u32) {
        self.write(&format!("push {seg} {idx}"));
    }

    pub fn write_pop(&mut self, seg: Segment, idx: u32) {
        self.write(&format!("pop {seg} {idx}"));
    }

    pub fn write_arithmetic(&mut self, cmd: Command) {
        self.write(&cmd.to_string());
    }

    pub fn write_label(&mut self, label: &str) {
        self.write(&format!("label {label}"));
    }

    pub fn write_goto(&mut self, label: &str) {
        self.write(&format!("goto {label}"));
    }

    pub fn write_if(&mut self, label: &str) {
        self.write(&format!("if-goto {label}"));
    }

    pub fn write_call(&mut self, name: &str, n_args: u32) {
        self.write(&format!("call {name} {n_args}"));
    }

    pub fn write_function(&mut self, name: &str, n_locals: u32) {
        self.write(&format!("function {name} {n_locals}"));
    }

    pub fn write_return(&mut self) {
        self.write("return");
    }

    pub fn into_output(self) -> String {
        self.out
    }
}
