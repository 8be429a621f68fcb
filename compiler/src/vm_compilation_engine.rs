//! Walks the parse tree of one class and emits its VM code.
use crate::{
    error::Result,
    parse_tree::{
        BinaryOp, Class, ClassVarKind, DoStatement, Expression, IfStatement, KeywordConstant,
        LetStatement, ReturnStatement, Statement, Statements, SubroutineCall, SubroutineDec,
        SubroutineKind, Term, UnaryOp, WhileStatement,
    },
    sym_table::{SymbolTable, VarKind},
    vm_writer::{Command, Segment, VmWriter},
};

struct VmCompilationEngine {
    code_gen: VmWriter,
    class_name: String,
    if_count: u32,
    while_count: u32,
}

/// Compiles `class` into VM code. Nothing is returned unless the whole class
/// compiled.
pub fn compile(class: &Class) -> Result<String> {
    let mut engine = VmCompilationEngine {
        code_gen: VmWriter::new(),
        class_name: class.name.clone(),
        if_count: 0,
        while_count: 0,
    };
    engine.compile_class(class)?;
    return Ok(engine.code_gen.into_output());
}

impl VmCompilationEngine {
    fn compile_class(&mut self, class: &Class) -> Result<()> {
        let mut sym_table = SymbolTable::new(&class.name);
        for dec in &class.var_decs {
            let kind = match dec.kind {
                ClassVarKind::Static => VarKind::Static,
                ClassVarKind::Field => VarKind::Field,
            };
            let tp = dec.ty.to_string();
            for name in &dec.names {
                sym_table.define(name, &tp, kind)?;
            }
        }
        for sub in &class.subroutines {
            self.compile_sub_routine_dec(sub, &sym_table)?;
        }
        return Ok(());
    }

    fn compile_sub_routine_dec(&mut self, sub: &SubroutineDec, class_table: &SymbolTable) -> Result<()> {
        let mut sym_table = class_table.start_subroutine(sub.kind == SubroutineKind::Method);
        for param in &sub.parameters.parameters {
            sym_table.define(&param.name, &param.ty.to_string(), VarKind::Argument)?;
        }
        // The function header states the local count, so every var is
        // registered before any statement is compiled.
        for dec in &sub.body.var_decs {
            let tp = dec.ty.to_string();
            for name in &dec.names {
                sym_table.define(name, &tp, VarKind::Local)?;
            }
        }

        let func_name = format!("{}.{}", self.class_name, sub.name);
        log::trace!("compiling {func_name}");
        self.code_gen
            .write_function(&func_name, sym_table.var_count(VarKind::Local));
        match sub.kind {
            SubroutineKind::Constructor => {
                self.code_gen.write_push(Segment::Const, sym_table.field_count());
                self.code_gen.write_call("Memory.alloc", 1);
                self.code_gen.write_pop(Segment::Pointer, 0);
            }
            SubroutineKind::Method => {
                self.code_gen.write_push(Segment::Argument, 0);
                self.code_gen.write_pop(Segment::Pointer, 0);
            }
            SubroutineKind::Function => {}
        }
        self.compile_statements(&sub.body.statements, &sym_table)
    }

    fn compile_statements(&mut self, statements: &Statements, sym_table: &SymbolTable) -> Result<()> {
        for statement in &statements.statements {
            match statement {
                Statement::Let(s) => self.compile_let(s, sym_table)?,
                Statement::If(s) => self.compile_if(s, sym_table)?,
                Statement::While(s) => self.compile_while(s, sym_table)?,
                Statement::Do(s) => self.compile_do(s, sym_table)?,
                Statement::Return(s) => self.compile_return(s, sym_table)?,
            }
        }
        return Ok(());
    }

    fn compile_let(&mut self, statement: &LetStatement, sym_table: &SymbolTable) -> Result<()> {
        let target = sym_table.resolve(&statement.name)?;
        match &statement.index {
            Some(index) => {
                self.code_gen.write_push(target.segment(), target.index);
                self.compile_expression(index, sym_table)?;
                self.code_gen.write_arithmetic(Command::Add);

                self.compile_expression(&statement.value, sym_table)?;

                // The value may itself have moved `pointer 1`, so the target
                // address is only bound after it is computed.
                self.code_gen.write_pop(Segment::Temp, 0);
                self.code_gen.write_pop(Segment::Pointer, 1);
                self.code_gen.write_push(Segment::Temp, 0);
                self.code_gen.write_pop(Segment::That, 0);
            }
            None => {
                self.compile_expression(&statement.value, sym_table)?;
                self.code_gen.write_pop(target.segment(), target.index);
            }
        }
        return Ok(());
    }

    fn compile_if(&mut self, statement: &IfStatement, sym_table: &SymbolTable) -> Result<()> {
        let count = self.if_count;
        self.if_count += 1;
        let false_label = format!("{}.IF_FALSE${}", self.class_name, count);
        let end_label = format!("{}.IF_END${}", self.class_name, count);

        self.compile_expression(&statement.condition, sym_table)?;
        self.code_gen.write_arithmetic(Command::Not);
        self.code_gen.write_if(&false_label);

        self.compile_statements(&statement.then_body, sym_table)?;
        self.code_gen.write_goto(&end_label);

        self.code_gen.write_label(&false_label);
        if let Some(else_body) = &statement.else_body {
            self.compile_statements(else_body, sym_table)?;
        }
        self.code_gen.write_label(&end_label);
        return Ok(());
    }

    fn compile_while(&mut self, statement: &WhileStatement, sym_table: &SymbolTable) -> Result<()> {
        let count = self.while_count;
        self.while_count += 1;
        let start_label = format!("{}.WHILE_START${}", self.class_name, count);
        let end_label = format!("{}.WHILE_END${}", self.class_name, count);

        self.code_gen.write_label(&start_label);
        self.compile_expression(&statement.condition, sym_table)?;
        self.code_gen.write_arithmetic(Command::Not);
        self.code_gen.write_if(&end_label);

        self.compile_statements(&statement.body, sym_table)?;
        self.code_gen.write_goto(&start_label);

        self.code_gen.write_label(&end_label);
        return Ok(());
    }

    fn compile_do(&mut self, statement: &DoStatement, sym_table: &SymbolTable) -> Result<()> {
        self.compile_subroutine_call(&statement.call, sym_table)?;
        self.code_gen.write_pop(Segment::Temp, 0);
        return Ok(());
    }

    fn compile_return(&mut self, statement: &ReturnStatement, sym_table: &SymbolTable) -> Result<()> {
        match &statement.value {
            Some(value) => self.compile_expression(value, sym_table)?,
            None => self.code_gen.write_push(Segment::Const, 0),
        }
        self.code_gen.write_return();
        return Ok(());
    }

    fn compile_expression(&mut self, expression: &Expression, sym_table: &SymbolTable) -> Result<()> {
        self.compile_term(&expression.term, sym_table)?;
        for (op, term) in &expression.rest {
            self.compile_term(term, sym_table)?;
            self.compile_op(*op);
        }
        return Ok(());
    }

    fn compile_op(&mut self, op: BinaryOp) {
        match op {
            BinaryOp::Add => self.code_gen.write_arithmetic(Command::Add),
            BinaryOp::Sub => self.code_gen.write_arithmetic(Command::Sub),
            BinaryOp::Mul => self.code_gen.write_call("Math.multiply", 2),
            BinaryOp::Div => self.code_gen.write_call("Math.divide", 2),
            BinaryOp::And => self.code_gen.write_arithmetic(Command::And),
            BinaryOp::Or => self.code_gen.write_arithmetic(Command::Or),
            BinaryOp::Lt => self.code_gen.write_arithmetic(Command::Lt),
            BinaryOp::Gt => self.code_gen.write_arithmetic(Command::Gt),
            BinaryOp::Eq => self.code_gen.write_arithmetic(Command::Eq),
        }
    }

    fn compile_term(&mut self, term: &Term, sym_table: &SymbolTable) -> Result<()> {
        match term {
            Term::IntegerConstant(i) => self.code_gen.write_push(Segment::Const, *i),
            Term::StringConstant(s) => {
                self.code_gen
                    .write_push(Segment::Const, s.chars().count() as u32);
                self.code_gen.write_call("String.new", 1);
                for c in s.chars() {
                    self.code_gen.write_push(Segment::Const, u32::from(c));
                    self.code_gen.write_call("String.appendChar", 2);
                }
            }
            Term::KeywordConstant(k) => match k {
                KeywordConstant::True => {
                    self.code_gen.write_push(Segment::Const, 0);
                    self.code_gen.write_arithmetic(Command::Not);
                }
                KeywordConstant::False | KeywordConstant::Null => {
                    self.code_gen.write_push(Segment::Const, 0)
                }
                KeywordConstant::This => self.code_gen.write_push(Segment::Pointer, 0),
            },
            Term::Var(name) => {
                let symbol = sym_table.resolve(name)?;
                self.code_gen.write_push(symbol.segment(), symbol.index);
            }
            Term::Index { name, index } => {
                let arr = sym_table.resolve(name)?;
                self.code_gen.write_push(arr.segment(), arr.index);
                self.compile_expression(index, sym_table)?;
                self.code_gen.write_arithmetic(Command::Add);
                self.code_gen.write_pop(Segment::Pointer, 1);
                self.code_gen.write_push(Segment::That, 0);
            }
            Term::Parenthesized(inner) => self.compile_expression(inner, sym_table)?,
            Term::Unary { op, term } => {
                self.compile_term(term, sym_table)?;
                match op {
                    UnaryOp::Neg => self.code_gen.write_arithmetic(Command::Neg),
                    UnaryOp::Not => self.code_gen.write_arithmetic(Command::Not),
                }
            }
            Term::Call(call) => self.compile_subroutine_call(call, sym_table)?,
        }
        return Ok(());
    }

    /// Pushes the receiver (if any) and the arguments, then calls. Whether
    /// `x.f()` is a method call depends only on `x` being a known variable.
    fn compile_subroutine_call(&mut self, call: &SubroutineCall, sym_table: &SymbolTable) -> Result<()> {
        let (func_name, n_receiver) = match &call.receiver {
            None => {
                self.code_gen.write_push(Segment::Pointer, 0);
                (format!("{}.{}", self.class_name, call.name), 1)
            }
            Some(obj_or_class_name) => match sym_table.lookup(obj_or_class_name) {
                Some(symbol) => {
                    self.code_gen.write_push(symbol.segment(), symbol.index);
                    (format!("{}.{}", symbol.ty, call.name), 1)
                }
                None => (format!("{}.{}", obj_or_class_name, call.name), 0),
            },
        };
        for arg in &call.arguments.expressions {
            self.compile_expression(arg, sym_table)?;
        }
        let n_args = call.arguments.expressions.len() as u32 + n_receiver;
        self.code_gen.write_call(&func_name, n_args);
        return Ok(());
    }
}
