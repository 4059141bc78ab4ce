use crate::codegen::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case(Instruction::BeginFunc { index: 2, params_size: 3 }, "BEGIN_FUNC 2, 3, 0"; "begin func")]
#[test_case(Instruction::EndFunc, "END_FUNC"; "end func")]
#[test_case(Instruction::LoadConst(-4), "LOAD_CONST -4"; "load const")]
#[test_case(Instruction::LoadGlobalAddr(0), "LOAD_GLOBAL_ADDR 0"; "load global addr")]
#[test_case(Instruction::StoreRef(1), "STORE_REF 1"; "store ref")]
#[test_case(Instruction::Binary(BinaryOp::Ne), "NE"; "not equal")]
#[test_case(Instruction::Unary(UnaryOp::Not), "NOT"; "not")]
#[test_case(Instruction::AddOffset(1), "ADD 1"; "field offset")]
#[test_case(Instruction::Scale(2), "MUL 2"; "index scale")]
#[test_case(Instruction::Step(Step::PostDec, 1), "POST_DEC 1"; "post decrement")]
#[test_case(Instruction::Call(3), "CALL 3"; "call")]
#[test_case(Instruction::Jump(JumpKind::ForwardIfFalse, Label(7)), "TJMP_FW L7"; "test jump")]
#[test_case(Instruction::Jump(JumpKind::Backward, Label(0)), "JMP_BW L0"; "back jump")]
#[test_case(Instruction::Label(Label(12)), "L12:"; "label")]
fn test_instruction_line(instruction: Instruction, expected: &str) {
    assert_eq!(expected, instruction.to_string());
}

#[test]
fn test_listing_one_line_per_instruction() {
    let listing = Listing {
        instructions: vec![
            Instruction::BeginFunc {
                index: 0,
                params_size: 0,
            },
            Instruction::LoadGlobalAddr(0),
            Instruction::LoadConst(1),
            Instruction::StoreRef(1),
            Instruction::EndFunc,
        ],
    };
    let expected = "BEGIN_FUNC 0, 0, 0\nLOAD_GLOBAL_ADDR 0\nLOAD_CONST 1\nSTORE_REF 1\nEND_FUNC\n";
    assert_eq!(expected, listing.to_string());
}
