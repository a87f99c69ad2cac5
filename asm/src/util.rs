use crate::parser::MachineWord;
use crate::Assembly;
use arch::inst::Inst;
use color_print::cformat;

/// Listing of the assembled program followed by the label table.
pub fn dump(asm: &Assembly, path: &str) -> String {
    let mut out = vec![];
    out.push(format!(
        "{}+------[{}]{}",
        "-".repeat(19),
        path,
        "-".repeat(45usize.saturating_sub(path.len()))
    ));

    let mut words = asm.link().into_iter();
    for line in &asm.lines {
        let line_no = line.idx + 1;
        let body = match &line.stmt {
            None => format!("{:19}| {:>4}:", "", line_no),
            Some((addr, stmt)) => {
                let word = match words.next() {
                    Some(MachineWord::Value(v)) => match Inst::decode(v) {
                        Ok(inst) if stmt.kind.base().is_some() => {
                            cformat!("{:>5} {}", v, inst.cformat())
                        }
                        _ => cformat!("{:>5} <y>DAT</>   ", v),
                    },
                    _ => cformat!("<r,s>  ???</>       "),
                };
                format!("[{:0>2}] {} | {:>4}:   {}", addr, word, line_no, stmt.cformat())
            }
        };
        out.push(body);
    }

    out.push(format!("{}+{}", "-".repeat(19), "-".repeat(53)));
    for (name, label) in asm.labels.iter() {
        let addr = match label.addr {
            Some(addr) => cformat!("<g>{:0>2}</>", addr),
            None => cformat!("<r,u>??</>"),
        };
        out.push(format!("{:19}| {} {}", "", addr, name));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_line_and_label() {
        let src = "START INP\n\nBRZ END\nBRA START\nEND HLT";
        let asm = crate::parse(src.lines()).unwrap();
        let listing = dump(&asm, "t.lmc");
        let lines: Vec<_> = listing.lines().collect();
        // header + 5 source lines + separator + 2 labels
        assert_eq!(lines.len(), 9);
        assert!(lines[1].starts_with("[00]"));
        assert!(lines[4].starts_with("[02]"));
        assert!(lines[8].ends_with("END"));
    }

    #[test]
    fn unresolved_words_are_marked() {
        let asm = crate::parse(["BRA NOWHERE"]).unwrap();
        let listing = dump(&asm, "t.lmc");
        assert!(listing.contains("???"));
        assert!(listing.contains("??"));
    }
}
