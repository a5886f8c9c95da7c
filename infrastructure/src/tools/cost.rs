//! Arithmetic tools: calculate_food_cost and calculate

use brigade_domain::tool::{required_f64, required_str};
use brigade_domain::{
    ParamType, ToolArguments, ToolDefinition, ToolDescriptor, ToolError, ToolParameter,
};

pub const CALCULATE_FOOD_COST: &str = "calculate_food_cost";
pub const CALCULATE: &str = "calculate";

pub fn food_cost_definition() -> ToolDefinition {
    ToolDefinition::new(
        CALCULATE_FOOD_COST,
        "Calculates the total cost of an ingredient.",
    )
    .with_parameter(
        ToolParameter::new(
            "price_per_kg",
            "The price of the ingredient per kilogram",
            true,
        )
        .with_type(ParamType::Number),
    )
    .with_parameter(
        ToolParameter::new("weight_kg", "The weight of the ingredient in kilograms", true)
            .with_type(ParamType::Number),
    )
}

/// Total cost rounded to two decimals
pub fn execute_food_cost(arguments: &ToolArguments) -> Result<String, ToolError> {
    let price = required_f64(arguments, "price_per_kg")?;
    let weight = required_f64(arguments, "weight_kg")?;
    if price < 0.0 || weight < 0.0 {
        return Err(ToolError::invalid_argument(
            "price_per_kg and weight_kg must not be negative",
        ));
    }
    Ok(format_number(round2(price * weight)))
}

pub fn calculate_definition() -> ToolDefinition {
    ToolDefinition::new(
        CALCULATE,
        "Evaluates a simple arithmetic expression to compute totals.",
    )
    .with_parameter(ToolParameter::new(
        "expression",
        "The arithmetic expression (e.g., '12 + 16 + 8')",
        true,
    ))
}

/// Evaluate `+ - * /` with parentheses. Only digits, those operators,
/// `.`, `(`, `)` and spaces are accepted.
pub fn execute_calculate(arguments: &ToolArguments) -> Result<String, ToolError> {
    let expression = required_str(arguments, "expression")?;
    if let Some(c) = expression
        .chars()
        .find(|c| !(c.is_ascii_digit() || "+-*/.() ".contains(*c)))
    {
        return Err(ToolError::invalid_argument(format!(
            "character '{}' is not allowed",
            c
        )));
    }
    let value = Parser::new(expression)
        .evaluate()
        .map_err(ToolError::invalid_argument)?;
    Ok(format_number(value))
}

pub fn food_cost_descriptor() -> ToolDescriptor {
    ToolDescriptor::from_fn(food_cost_definition(), execute_food_cost)
}

pub fn calculate_descriptor() -> ToolDescriptor {
    ToolDescriptor::from_fn(calculate_definition(), execute_calculate)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn format_number(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Deepest run of unary signs and open parentheses accepted
const MAX_NESTING: usize = 64;

/// Recursive-descent evaluator over a pre-checked expression
struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            depth: 0,
        }
    }

    fn evaluate(mut self) -> Result<f64, String> {
        let value = self.expr()?;
        self.skip_spaces();
        match self.chars.next() {
            None if value.is_finite() => Ok(value),
            None => Err("result is not a finite number".to_string()),
            Some(c) => Err(format!("unexpected '{}'", c)),
        }
    }

    fn skip_spaces(&mut self) {
        while self.chars.next_if_eq(&' ').is_some() {}
    }

    fn peek_op(&mut self) -> Option<char> {
        self.skip_spaces();
        self.chars.peek().copied()
    }

    fn expr(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek_op() {
            self.chars.next();
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.factor()?;
        while let Some(op @ ('*' | '/')) = self.peek_op() {
            self.chars.next();
            let rhs = self.factor()?;
            if op == '/' && rhs == 0.0 {
                return Err("division by zero".to_string());
            }
            value = if op == '*' { value * rhs } else { value / rhs };
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, String> {
        if self.depth >= MAX_NESTING {
            return Err("expression too deeply nested".to_string());
        }
        self.depth += 1;
        let value = self.nested_factor();
        self.depth -= 1;
        value
    }

    fn nested_factor(&mut self) -> Result<f64, String> {
        match self.peek_op() {
            Some('-') => {
                self.chars.next();
                Ok(-self.factor()?)
            }
            Some('+') => {
                self.chars.next();
                self.factor()
            }
            Some('(') => {
                self.chars.next();
                let value = self.expr()?;
                match self.peek_op() {
                    Some(')') => {
                        self.chars.next();
                        Ok(value)
                    }
                    _ => Err("missing ')'".to_string()),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(format!("unexpected '{}'", c)),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    fn number(&mut self) -> Result<f64, String> {
        let mut literal = String::new();
        while let Some(c) = self.chars.next_if(|c| c.is_ascii_digit() || *c == '.') {
            literal.push(c);
        }
        literal
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{}'", literal))
    }
}
