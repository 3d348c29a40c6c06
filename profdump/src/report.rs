//! Text report rendering
//!
//! Writes a hierarchical indented dump of every decoded field. Rendering is a
//! display concern only: name bytes are shown lossily, the total-time line is
//! skipped when the CPU frequency ratio is zero, and nothing here can fail on
//! content — only on the output writer.

use std::io::{self, Write};

use crate::trace_data::{Block, ContextSwitch, Descriptor, FileHeader, ProfileData, ThreadSection};

/// Write the full report for one decoded trace.
pub fn write_profile<W: Write>(out: &mut W, profile: &ProfileData) -> io::Result<()> {
    write_header(out, &profile.header)?;
    write_descriptors(out, &profile.descriptors)?;
    write_thread_sections(out, &profile.thread_sections)?;
    Ok(())
}

fn write_header<W: Write>(out: &mut W, header: &FileHeader) -> io::Result<()> {
    writeln!(out, "Header Contents:")?;
    writeln!(out, "Signature: {}({})", header.signature, header.signature_ascii())?;
    writeln!(out, "Version: {}", header.version)?;
    writeln!(out, "Profiled Process ID: {}", header.process_id)?;
    writeln!(out, "CPU Frequency Ratio: {}", header.cpu_frequency_ratio)?;
    writeln!(out, "Begin Time: {}", header.begin_time)?;
    match header.duration_ms() {
        Some(ms) => writeln!(out, "End Time: {} (Total time: {ms:.6} ms)", header.end_time)?,
        None => writeln!(out, "End Time: {} (Total time: n/a, zero ratio)", header.end_time)?,
    }
    writeln!(out, "Num Blocks: {}", header.num_blocks)?;
    writeln!(out, "Blocks Memory Usage: {}", header.blocks_memory_usage)?;
    writeln!(out, "Num Descriptors: {}", header.num_descriptors)?;
    writeln!(out, "Descriptor Memory Usage: {}", header.descriptors_memory_usage)?;
    Ok(())
}

fn write_descriptors<W: Write>(out: &mut W, descriptors: &[Descriptor]) -> io::Result<()> {
    writeln!(out, "Descriptors:")?;
    for (index, descriptor) in descriptors.iter().enumerate() {
        writeln!(
            out,
            "  [{index}] id={} line={} color=#{:02x}{:02x}{:02x}{:02x} type={} status={} \
             name=\"{}\" file=\"{}\"",
            descriptor.id,
            descriptor.line,
            descriptor.alpha(),
            descriptor.red(),
            descriptor.green(),
            descriptor.blue(),
            descriptor.kind,
            descriptor.status,
            descriptor.name_lossy(),
            descriptor.file_name_lossy(),
        )?;
    }
    Ok(())
}

fn write_thread_sections<W: Write>(out: &mut W, sections: &[ThreadSection]) -> io::Result<()> {
    writeln!(out, "Threads:")?;
    for section in sections {
        writeln!(
            out,
            "  Thread {} \"{}\" ({} context switches, {} blocks)",
            section.info.thread_id,
            section.info.name_lossy(),
            section.context_switches.len(),
            section.blocks.len(),
        )?;
        write_context_switches(out, &section.context_switches)?;
        write_blocks(out, &section.blocks)?;
    }
    Ok(())
}

fn write_context_switches<W: Write>(out: &mut W, switches: &[ContextSwitch]) -> io::Result<()> {
    if switches.is_empty() {
        return Ok(());
    }
    writeln!(out, "    Context Switches:")?;
    for (index, cs) in switches.iter().enumerate() {
        writeln!(
            out,
            "      [{index}] begin={} end={} (dur={}) target={} process_info={} bytes",
            cs.begin_time,
            cs.end_time,
            cs.duration(),
            cs.target_thread_id,
            cs.process_info.len(),
        )?;
    }
    Ok(())
}

fn write_blocks<W: Write>(out: &mut W, blocks: &[Block]) -> io::Result<()> {
    if blocks.is_empty() {
        return Ok(());
    }
    writeln!(out, "    Blocks:")?;
    for (index, block) in blocks.iter().enumerate() {
        writeln!(
            out,
            "      [{index}] id={} begin={} end={} (dur={}) name=\"{}\"",
            block.id,
            block.begin_time,
            block.end_time,
            block.duration(),
            block.runtime_name_lossy(),
        )?;
    }
    Ok(())
}
